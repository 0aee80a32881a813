//! Lenient reading of recipe entries.

use serde_json::Value;

use super::{BreedingPattern, Recipe};

impl Recipe {
	/// Reads one recipe entry, degrading anything unexpected instead of failing.
	///
	/// Accepted forms:
	/// - `{"childrenList": [["a", "b"], ...]}`
	/// - `{"patterns": [["a", "b"], ...]}`
	/// - `[["a", "b"], ...]`
	/// - `["a", "b"]`, a single pattern.
	///
	/// An entry that matches none of these has no patterns, making `name` a base creature.
	/// A pattern holding anything other than strings is kept as an empty pattern so later patterns keep their index.
	/* NOTE: We don't derive `Deserialize` for the entry forms, one bad entry would fail the whole file. */
	pub fn read_from_json(name: &str, value: Value) -> Recipe {
		let list = match value {
			Value::Object(mut obj) => {
				match obj.remove("childrenList").or_else(|| obj.remove("patterns")) {
					Some(Value::Array(list)) => list,
					Some(_) | None => {
						log::warn!("Recipe entry for {} has no pattern list, treating as a base creature.", name);
						return Recipe::default();
					},
				}
			},
			Value::Array(list) => {
				if matches!(list.first(), Some(Value::String(_))) {
					/* A bare pattern */
					return Recipe::new([read_pattern(name, Value::Array(list))]);
				}
				list
			},
			Value::Null => return Recipe::default(),
			_ => {
				log::warn!("Recipe entry for {} is not an object or list, treating as a base creature.", name);
				return Recipe::default();
			},
		};

		Recipe::new(list.into_iter().map(|p| read_pattern(name, p)))
	}
}

fn read_pattern(name: &str, value: Value) -> BreedingPattern {
	let parents = match value {
		Value::Array(parents) => parents,
		_ => {
			log::warn!("Pattern for {} is not a list, ignoring it.", name);
			return BreedingPattern::default();
		},
	};

	let mut names = Vec::<String>::with_capacity(parents.len());
	for parent in parents {
		match parent {
			Value::String(s) if !s.is_empty() => names.push(s),
			_ => {
				log::warn!("Pattern for {} has a parent that is not a non-empty name, ignoring it.", name);
				return BreedingPattern::default();
			},
		}
	}
	BreedingPattern::new(names)
}
