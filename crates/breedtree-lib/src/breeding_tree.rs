//! Expanding a creature into its breeding tree and reducing the tree to a shopping list.
//!
//! # Usage
//! 1. Create a [`TreeBuilder`] over a [`RecipeDB`](crate::RecipeDB).
//! 1. Give the builder the marks for the tree and whether meguriai collapse is enabled.
//! 1. [`TreeBuilder::build()`] a root name to get a [`DisplayTreeNode`].
//! 1. [`ShoppingList::aggregate()`] the tree with the same marks to list the creatures still needed.
//!
//! # Pruning
//! A node is not expanded when, checked in this order,
//! 1. its path is marked owned or its name is marked direct-obtain,
//! 1. its name already appears between the root and itself (a recipe cycle),
//! 1. meguriai collapse is enabled and the name was already reached earlier in the build,
//! 1. it has no breeding pattern.

mod display_tree;
pub use display_tree::DisplayTreeNode;
pub use display_tree::PreOrder;
pub use display_tree::child_path;

mod tree_builder;
pub use tree_builder::TreeBuilder;
pub use tree_builder::build_display_tree;

mod leaf_aggregator;
pub use leaf_aggregator::collect_leaves;
pub use leaf_aggregator::ShoppingList;
pub use leaf_aggregator::ShoppingListEntry;
