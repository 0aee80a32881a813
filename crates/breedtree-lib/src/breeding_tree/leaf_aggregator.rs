use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::marks::{DirectObtainMarks, OwnedMarks};

use super::display_tree::DisplayTreeNode;

/// Lists the creatures still needed to breed `tree`, one entry per occurrence, in pre-order.
///
/// A node stands for itself when it is owned, direct-obtain or has no children.
/// The marks are checked again here instead of relying on the tree shape,
/// so a tree built with fewer marks than it is aggregated with still gives the right list.
pub fn collect_leaves<'t>(tree: &'t DisplayTreeNode, owned: &OwnedMarks, direct_obtain: &DirectObtainMarks) -> Vec<&'t str> {
	fn collect_into<'t>(node: &'t DisplayTreeNode, owned: &OwnedMarks, direct_obtain: &DirectObtainMarks, leaves: &mut Vec<&'t str>) {
		if owned.is_owned(&node.path) || direct_obtain.is_direct_obtain(&node.name) || node.is_leaf() {
			leaves.push(&node.name);
			return;
		}
		for child in &node.children {
			collect_into(child, owned, direct_obtain, leaves);
		}
	}

	let mut leaves = Vec::new();
	collect_into(tree, owned, direct_obtain, &mut leaves);
	leaves
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
	pub name: String,
	pub count: usize,
}

/// Distinct creatures still needed with how many of each, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
	entries: Vec<ShoppingListEntry>,
}

impl ShoppingList {
	/// Counts a sequence of leaf names.
	pub fn from_leaves<'n>(leaves: impl IntoIterator<Item = &'n str>) -> Self {
		let mut entries = Vec::<ShoppingListEntry>::new();
		let mut index = HashMap::<&str, usize>::new();
		for name in leaves {
			match index.get(name) {
				Some(&i) => entries[i].count += 1,
				None => {
					index.insert(name, entries.len());
					entries.push(ShoppingListEntry { name: name.to_owned(), count: 1 });
				},
			}
		}
		Self { entries }
	}

	/// Collects and counts the leaves of `tree`, see [`collect_leaves()`].
	pub fn aggregate(tree: &DisplayTreeNode, owned: &OwnedMarks, direct_obtain: &DirectObtainMarks) -> Self {
		Self::from_leaves(collect_leaves(tree, owned, direct_obtain))
	}

	pub fn entries(&self) -> &[ShoppingListEntry] {
		&self.entries
	}

	/// How many of `name` are needed, `0` when not listed.
	pub fn count_of(&self, name: &str) -> usize {
		self.entries.iter().find(|e| e.name == name).map_or(0, |e| e.count)
	}

	/// Total number of creatures, counting repeats.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|e| e.count).sum()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Display for ShoppingList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, entry) in self.entries.iter().enumerate() {
			if i > 0 {
				f.write_str(" | ")?;
			}
			f.write_str(&entry.name)?;
			if entry.count > 1 {
				write!(f, "×{}", entry.count)?;
			}
		}
		Ok(())
	}
}
