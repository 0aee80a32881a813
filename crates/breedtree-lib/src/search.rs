//! Candidate search over creature names.
//!
//! Both the query and the names are normalized before comparing:
//! hiragana is folded to katakana and everything is lowercased,
//! so `すらいむ`, `スライム` and `SLIME`/`slime` style variants match each other.

/// How many candidates a caller shows for one query.
pub const CANDIDATE_DISPLAY_LIMIT: usize = 10;

const HIRAGANA_START: char = '\u{3041}';
const HIRAGANA_END: char = '\u{3096}';
/// Distance from a hiragana code point to its katakana counterpart.
const KATAKANA_OFFSET: u32 = 0x60;

pub fn hiragana_to_katakana(s: &str) -> String {
	s.chars()
		.map(|c| {
			if (HIRAGANA_START..=HIRAGANA_END).contains(&c) {
				char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c)
			} else {
				c
			}
		})
		.collect()
}

pub fn normalize(s: &str) -> String {
	hiragana_to_katakana(s).to_lowercase()
}

/// Names containing `query` after normalization, in the order given.
///
/// An empty query matches nothing.
pub fn search<'n>(query: &str, names: impl IntoIterator<Item = &'n str>) -> Vec<&'n str> {
	if query.is_empty() {
		return Vec::new();
	}
	let query = normalize(query);
	names.into_iter()
		.filter(|name| normalize(name).contains(&query))
		.collect()
}
