use std::collections::HashSet;

use crate::marks::{DirectObtainMarks, OwnedMarks};
use crate::recipedb::RecipeDB;

use super::display_tree::{child_path, DisplayTreeNode};

/// Builds pruned breeding trees from a [`RecipeDB`].
///
/// The builder only borrows the marks, they are never modified.
/// One builder can build any number of trees, no state carries over between builds.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
	recipedb: &'a RecipeDB,
	owned: Option<&'a OwnedMarks>,
	direct_obtain: Option<&'a DirectObtainMarks>,
	meguriai: bool,
}

impl<'a> TreeBuilder<'a> {
	pub fn new(recipedb: &'a RecipeDB) -> Self {
		Self {
			recipedb,
			owned: None,
			direct_obtain: None,
			meguriai: false,
		}
	}

	pub fn owned_marks(mut self, owned: &'a OwnedMarks) -> Self {
		self.owned = Some(owned);
		self
	}

	pub fn direct_obtain_marks(mut self, direct_obtain: &'a DirectObtainMarks) -> Self {
		self.direct_obtain = Some(direct_obtain);
		self
	}

	/// Enables meguriai collapse: only the first occurrence of a name in pre-order is expanded,
	/// later ones are assumed to be reused copies and left as leaves.
	pub fn meguriai(mut self, enabled: bool) -> Self {
		self.meguriai = enabled;
		self
	}

	fn is_owned(&self, path: &str) -> bool {
		self.owned.map_or(false, |m| m.is_owned(path))
	}

	fn is_direct_obtain(&self, name: &str) -> bool {
		self.direct_obtain.map_or(false, |m| m.is_direct_obtain(name))
	}

	/// Expands `root` into its breeding tree.
	///
	/// # Errors
	/// - [`InvalidArgument`](crate::error::Error::InvalidArgument) if `root` is empty.
	pub fn build(&self, root: &str) -> crate::Result<DisplayTreeNode> {
		if root.is_empty() {
			return Err(crate::Error::InvalidArgument("root name must not be empty".to_string()));
		}

		log::debug!("Building tree for {} (meguriai: {})", root, self.meguriai);
		let mut expansion = Expansion {
			builder: *self,
			ancestors: Default::default(),
			meguriai_seen: Default::default(),
		};
		let tree = expansion.expand(root, String::new());
		log::debug!("Built tree for {} with {} nodes", root, tree.node_count());
		Ok(tree)
	}
}

/// Expands `root` the same way as [`TreeBuilder::build()`].
pub fn build_display_tree(root: &str, owned: &OwnedMarks, direct_obtain: &DirectObtainMarks, recipedb: &RecipeDB, meguriai: bool) -> crate::Result<DisplayTreeNode> {
	TreeBuilder::new(recipedb)
		.owned_marks(owned)
		.direct_obtain_marks(direct_obtain)
		.meguriai(meguriai)
		.build(root)
}

/// State of a single build.
///
/// The two sets must stay separate, `ancestors` is unwound when leaving a node
/// while `meguriai_seen` only ever grows.
struct Expansion<'b> {
	builder: TreeBuilder<'b>,
	/// Names on the path from the root to the node being expanded, excluding it.
	ancestors: HashSet<&'b str>,
	/// Every name reached so far in pre-order, used when meguriai is enabled.
	meguriai_seen: HashSet<&'b str>,
}

impl<'b> Expansion<'b> {
	fn expand(&mut self, name: &'b str, path: String) -> DisplayTreeNode {
		let builder = self.builder;

		if builder.is_owned(&path) || builder.is_direct_obtain(name) {
			log::trace!("{} at `{}` is marked, not expanding", name, path);
			return DisplayTreeNode::leaf(name, path);
		}

		if self.ancestors.contains(name) {
			log::trace!("{} at `{}` is its own ancestor, not expanding", name, path);
			return DisplayTreeNode::leaf(name, path);
		}

		if builder.meguriai && !self.meguriai_seen.insert(name) {
			log::trace!("{} at `{}` was already reached, collapsing", name, path);
			return DisplayTreeNode::leaf(name, path);
		}

		let pattern = match builder.recipedb.first_pattern(name) {
			Some(p) => p,
			None => return DisplayTreeNode::leaf(name, path),
		};

		self.ancestors.insert(name);
		let children = pattern.parents()
			.iter()
			.enumerate()
			.map(|(idx, parent)| {
				let parent_path = child_path(&path, parent, idx);
				self.expand(parent, parent_path)
			})
			.collect();
		self.ancestors.remove(name);

		DisplayTreeNode { name: name.to_owned(), path, children }
	}
}
