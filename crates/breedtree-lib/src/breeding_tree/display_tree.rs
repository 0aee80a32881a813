use serde::{Serialize, Deserialize};

/// One occurrence of a creature in a built tree.
///
/// A node has no children when it is a base creature, marked owned or direct-obtain,
/// or was collapsed by the cycle guard or meguriai.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTreeNode {
	pub name: String,
	/// Position of this occurrence, unique within one tree.
	pub path: String,
	/// Parents in the order of the breeding pattern.
	pub children: Vec<DisplayTreeNode>,
}

/// Path of the parent at `index` under the node at `parent_path`.
pub fn child_path(parent_path: &str, child_name: &str, index: usize) -> String {
	if parent_path.is_empty() {
		format!("{}:{}", child_name, index)
	} else {
		format!("{}/{}:{}", parent_path, child_name, index)
	}
}

impl DisplayTreeNode {
	pub(super) fn leaf(name: &str, path: String) -> Self {
		Self { name: name.to_owned(), path, children: Vec::new() }
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	/// Nodes in pre-order, starting with `self`.
	pub fn iter(&self) -> PreOrder<'_> {
		PreOrder { stack: vec![self] }
	}

	pub fn node_count(&self) -> usize {
		self.iter().count()
	}

	/// Finds the node at `path`.
	pub fn find(&self, path: &str) -> Option<&DisplayTreeNode> {
		/* Only descend into children whose path leads towards `path` */
		let mut node = self;
		loop {
			if node.path == path {
				return Some(node);
			}
			node = node.children.iter().find(|c| {
				path == c.path || (path.starts_with(&c.path) && path[c.path.len()..].starts_with('/'))
			})?;
		}
	}
}

pub struct PreOrder<'a> {
	stack: Vec<&'a DisplayTreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
	type Item = &'a DisplayTreeNode;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children.iter().rev());
		Some(node)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(name: &str, path: &str, children: Vec<DisplayTreeNode>) -> DisplayTreeNode {
		DisplayTreeNode { name: name.to_string(), path: path.to_string(), children }
	}

	fn sample() -> DisplayTreeNode {
		node("A", "", vec![
			node("B", "B:0", vec![
				node("D", "B:0/D:0", vec![]),
				node("E", "B:0/E:1", vec![]),
			]),
			node("B", "B:1", vec![]),
		])
	}

	#[test]
	fn child_paths() {
		assert_eq!(child_path("", "B", 0), "B:0");
		assert_eq!(child_path("B:0", "D", 1), "B:0/D:1");
	}

	#[test]
	fn pre_order_iteration() {
		let tree = sample();
		let paths: Vec<_> = tree.iter().map(|n| n.path.as_str()).collect();
		assert_eq!(paths, ["", "B:0", "B:0/D:0", "B:0/E:1", "B:1"]);
		assert_eq!(tree.node_count(), 5);
	}

	#[test]
	fn find_by_path() {
		let tree = sample();
		assert_eq!(tree.find("B:0/E:1").map(|n| n.name.as_str()), Some("E"));
		assert_eq!(tree.find("B:1").map(|n| n.is_leaf()), Some(true));
		assert_eq!(tree.find("").map(|n| n.name.as_str()), Some("A"));
		assert!(tree.find("B:0/F:2").is_none());
		assert!(tree.find("B:").is_none());
	}
}
