//! # Recipe database
//!
//! A read-only mapping from creature name to the breeding patterns producing it.
//! Names missing from the database are base creatures.
//!
//! The database is read from a JSON object, see [`Recipe::read_from_json()`] for the accepted entry forms.
//! Key order of the source file is kept as it is the order search results are listed in.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Serialize, Deserialize, Deserializer};

mod import;

/// One way of breeding a creature, its parents in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreedingPattern {
	parents: Vec<String>,
}

impl BreedingPattern {
	pub fn new(parents: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self { parents: parents.into_iter().map(Into::into).collect() }
	}

	pub fn parents(&self) -> &[String] {
		&self.parents
	}

	pub fn is_empty(&self) -> bool {
		self.parents.is_empty()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
	/// Alternative patterns, only the first is ever expanded.
	pub patterns: Vec<BreedingPattern>,
}

impl Recipe {
	pub fn new(patterns: impl IntoIterator<Item = BreedingPattern>) -> Self {
		Self { patterns: patterns.into_iter().collect() }
	}

	/// The pattern used for expansion, `None` when there is nothing to expand.
	pub fn first_pattern(&self) -> Option<&BreedingPattern> {
		self.patterns.first().filter(|p| !p.is_empty())
	}
}

/// Serializes as `{name: {"patterns": [...]}}` in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipeDB {
	recipes: IndexMap<String, Recipe>,
}

impl RecipeDB {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a recipe. A new name goes to the end of the listing order.
	pub fn insert(&mut self, name: impl Into<String>, recipe: Recipe) {
		self.recipes.insert(name.into(), recipe);
	}

	pub fn get(&self, name: &str) -> Option<&Recipe> {
		self.recipes.get(name)
	}

	/// Shortcut for the pattern a tree build expands `name` with.
	pub fn first_pattern(&self, name: &str) -> Option<&BreedingPattern> {
		self.get(name).and_then(Recipe::first_pattern)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.recipes.contains_key(name)
	}

	/// Names in source order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.recipes.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.recipes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipes.is_empty()
	}

	/// Candidate names for a partial query, at most [`CANDIDATE_DISPLAY_LIMIT`](crate::search::CANDIDATE_DISPLAY_LIMIT).
	pub fn search_candidates(&self, query: &str) -> Vec<&str> {
		let mut found = crate::search::search(query, self.names());
		found.truncate(crate::search::CANDIDATE_DISPLAY_LIMIT);
		found
	}

	/* Serialization */

	pub fn from_json_str(s: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	/// Loads a recipe file.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when opening or reading from the file.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when the file is not a JSON object.
	/// Malformed entries inside the object are not errors, see [`Recipe::read_from_json()`].
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let file = std::fs::File::open(path)?;
		let db: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
		log::info!("Loaded {} recipes from {}", db.len(), path.display());
		Ok(db)
	}

	/// Loads the recipe file named in `config`.
	///
	/// # Errors
	/// - [`NotFound`](crate::error::Error::NotFound) when no recipe file is configured.
	pub fn load_from_config(config: &crate::Config) -> crate::Result<Self> {
		let path = config.recipe_path().ok_or_else(|| crate::Error::NotFound("recipe file not configured".to_string()))?;
		Self::load_from_file(path)
	}
}

impl FromIterator<(String, Recipe)> for RecipeDB {
	fn from_iter<T: IntoIterator<Item = (String, Recipe)>>(iter: T) -> Self {
		let mut db = Self::new();
		for (name, recipe) in iter {
			db.insert(name, recipe);
		}
		db
	}
}

impl<'de> Deserialize<'de> for RecipeDB {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
		Ok(raw.into_iter()
			.map(|(name, value)| {
				let recipe = Recipe::read_from_json(&name, value);
				(name, recipe)
			})
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_keep_source_order() {
		let db = RecipeDB::from_json_str(r#"{"C": [["A", "B"]], "A": [], "B": {"childrenList": [["C", "C"]]}}"#).unwrap();
		assert_eq!(db.names().collect::<Vec<_>>(), ["C", "A", "B"]);
		assert_eq!(db.first_pattern("B").map(|p| p.parents().to_vec()), Some(vec!["C".to_string(), "C".to_string()]));
		assert!(db.first_pattern("A").is_none());
		assert!(db.first_pattern("missing").is_none());
	}

	#[test]
	fn serialized_form_reads_back() {
		let db = RecipeDB::from_json_str(r#"{"Z": [["X", "Y"], ["Y", "X"]], "X": []}"#).unwrap();
		let json = serde_json::to_string(&db).unwrap();
		assert_eq!(json, r#"{"Z":{"patterns":[["X","Y"],["Y","X"]]},"X":{"patterns":[]}}"#);
		assert_eq!(RecipeDB::from_json_str(&json).unwrap(), db);
	}

	#[test]
	fn top_level_must_be_an_object() {
		assert!(matches!(RecipeDB::from_json_str("[1, 2]"), Err(crate::Error::SerdeJSON(_))));
	}

	#[test]
	fn reinsert_keeps_position() {
		let mut db: RecipeDB = ["A", "B", "C"].into_iter().map(|n| (n.to_string(), Recipe::default())).collect();
		db.insert("A", Recipe::new([BreedingPattern::new(["B", "C"])]));
		assert_eq!(db.names().collect::<Vec<_>>(), ["A", "B", "C"]);
		assert!(db.first_pattern("A").is_some());
	}

	#[test]
	fn large_database_loads() {
		let body = (0..40_000).map(|i| format!(r#""name{i}": [["a{i}", "b{i}"]]"#)).collect::<Vec<_>>().join(",");
		let started = std::time::Instant::now();
		let db = RecipeDB::from_json_str(&format!("{{{}}}", body)).unwrap();
		assert_eq!(db.len(), 40_000);
		assert_eq!(db.names().last(), Some("name39999"));
		assert_eq!(db.first_pattern("name20000").map(|p| p.parents().len()), Some(2));
		assert!(started.elapsed() < std::time::Duration::from_secs(5), "loading took {:?}", started.elapsed());
	}
}
