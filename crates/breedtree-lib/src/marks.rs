//! User marks applied to a breeding tree.
//!
//! Marks are keyed two different ways and the types keep them apart:
//! - By tree path: [`OwnedMarks`] and [`LineageMarks`] refer to one occurrence of a creature in one tree.
//! - By name: [`DirectObtainMarks`] apply to every occurrence of a creature.
//!
//! A tree path is the `/` separated list of `name:index` segments leading from the root to a node,
//! the root itself has the empty path. See [`child_path()`](crate::breeding_tree::child_path).

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

/// Occurrences the user already has, keyed by tree path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnedMarks(HashMap<String, bool>);

impl OwnedMarks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_owned(&self, path: &str) -> bool {
		self.0.get(path).copied().unwrap_or(false)
	}

	pub fn set(&mut self, path: impl Into<String>, owned: bool) {
		self.0.insert(path.into(), owned);
	}

	/// Flips the mark on `path` and returns the new value.
	pub fn toggle(&mut self, path: &str) -> bool {
		let owned = !self.is_owned(path);
		self.set(path, owned);
		owned
	}

	/// Paths currently marked owned.
	pub fn owned_paths(&self) -> impl Iterator<Item = &str> {
		self.0.iter().filter(|(_, v)| **v).map(|(k, _)| k.as_str())
	}
}

impl FromIterator<(String, bool)> for OwnedMarks {
	fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Creatures that can be obtained without breeding, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectObtainMarks(HashMap<String, bool>);

impl DirectObtainMarks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_direct_obtain(&self, name: &str) -> bool {
		self.0.get(name).copied().unwrap_or(false)
	}

	pub fn set(&mut self, name: impl Into<String>, direct_obtain: bool) {
		self.0.insert(name.into(), direct_obtain);
	}

	/// Flips the mark on `name` and returns the new value.
	pub fn toggle(&mut self, name: &str) -> bool {
		let direct_obtain = !self.is_direct_obtain(name);
		self.set(name, direct_obtain);
		direct_obtain
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().filter(|(_, v)| **v).map(|(k, _)| k.as_str())
	}
}

impl FromIterator<(String, bool)> for DirectObtainMarks {
	fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Which parent line an owned occurrence came from. Display only, never affects pruning.
///
/// Stored as `0..=3`, unknown integers read back as [`LineageTag::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum LineageTag {
	#[default] Unknown,
	A,
	B,
	Both,
}

impl LineageTag {
	/// The tag following this one when cycling through them.
	pub fn next(self) -> Self {
		match self {
			LineageTag::Unknown => LineageTag::A,
			LineageTag::A => LineageTag::B,
			LineageTag::B => LineageTag::Both,
			LineageTag::Both => LineageTag::Unknown,
		}
	}

	pub fn symbol(self) -> &'static str {
		match self {
			LineageTag::Unknown => "?",
			LineageTag::A => "♂",
			LineageTag::B => "♀",
			LineageTag::Both => "⚥",
		}
	}
}

impl From<u8> for LineageTag {
	fn from(value: u8) -> Self {
		match value {
			1 => LineageTag::A,
			2 => LineageTag::B,
			3 => LineageTag::Both,
			_ => LineageTag::Unknown,
		}
	}
}

impl From<LineageTag> for u8 {
	fn from(value: LineageTag) -> Self {
		match value {
			LineageTag::Unknown => 0,
			LineageTag::A => 1,
			LineageTag::B => 2,
			LineageTag::Both => 3,
		}
	}
}

/// Lineage tags keyed by tree path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageMarks(HashMap<String, LineageTag>);

impl LineageMarks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, path: &str) -> LineageTag {
		self.0.get(path).copied().unwrap_or_default()
	}

	pub fn set(&mut self, path: impl Into<String>, tag: LineageTag) {
		self.0.insert(path.into(), tag);
	}

	/// Advances the tag on `path` and returns the new tag.
	pub fn cycle(&mut self, path: &str) -> LineageTag {
		let tag = self.get(path).next();
		self.set(path, tag);
		tag
	}
}
