use breedtree::breeding_tree::*;
use breedtree::{DirectObtainMarks, DisplayTreeNode, OwnedMarks, RecipeDB};

fn db(json: &str) -> RecipeDB {
	breedtree_test_utils::get_recipedb(Some(json)).expect("failed to read recipes")
}

fn build(db: &RecipeDB, root: &str, meguriai: bool) -> DisplayTreeNode {
	build_display_tree(root, &OwnedMarks::new(), &DirectObtainMarks::new(), db, meguriai).expect("failed to build tree")
}

fn depth(node: &DisplayTreeNode) -> usize {
	1 + node.children.iter().map(depth).max().unwrap_or(0)
}

fn counts(list: &ShoppingList) -> Vec<(&str, usize)> {
	list.entries().iter().map(|e| (e.name.as_str(), e.count)).collect()
}

#[test]
fn absent_names_are_leaves() {
	let db = db(r#"{"A": [["X", "Y"]], "B": [["A", "Z"]]}"#);
	for meguriai in [false, true] {
		let tree = build(&db, "B", meguriai);
		for node in tree.iter().filter(|n| !db.contains(&n.name)) {
			assert!(node.is_leaf(), "{} at {} should be a leaf", node.name, node.path);
		}
		assert_eq!(tree.node_count(), 5);
	}
}

#[test]
fn owned_paths_are_not_expanded() {
	let db = breedtree_test_utils::get_recipedb(None).expect("failed to read recipes");
	let unmarked = build(&db, "メタルキング", false);
	assert!(!unmarked.find("キングスライム:0").expect("missing node").is_leaf());

	let owned: OwnedMarks = [("キングスライム:0".to_string(), true), ("ベホマスライム:1/スライムベス:1".to_string(), true)].into_iter().collect();
	let tree = build_display_tree("メタルキング", &owned, &DirectObtainMarks::new(), &db, false).unwrap();
	for path in owned.owned_paths() {
		assert!(tree.find(path).expect("owned node missing").is_leaf());
	}
	/* Other occurrences of the same names keep expanding */
	assert!(!tree.find("ベホマスライム:1/ホイミスライム:0").expect("missing node").is_leaf());
}

#[test]
fn direct_obtain_applies_to_every_occurrence() {
	let db = db(r#"{"A": [["B", "C"]], "C": [["B", "D"]], "B": [["E", "F"]]}"#);
	let direct: DirectObtainMarks = [("B".to_string(), true)].into_iter().collect();
	let tree = build_display_tree("A", &OwnedMarks::new(), &direct, &db, false).unwrap();
	let bs: Vec<_> = tree.iter().filter(|n| n.name == "B").collect();
	assert_eq!(bs.len(), 2);
	assert!(bs.iter().all(|n| n.is_leaf()));
}

#[test]
fn meguriai_collapses_later_occurrences() {
	let db = db(r#"{"A": [["B", "C"]], "B": [["D", "E"]], "C": [["B", "F"]]}"#);

	let tree = build(&db, "A", true);
	assert_eq!(tree.find("B:0").map(|n| n.children.len()), Some(2));
	assert!(tree.find("C:1/B:0").expect("missing node").is_leaf());
	assert_eq!(counts(&ShoppingList::aggregate(&tree, &OwnedMarks::new(), &DirectObtainMarks::new())), [("D", 1), ("E", 1), ("B", 1), ("F", 1)]);

	let tree = build(&db, "A", false);
	assert_eq!(tree.find("C:1/B:0").map(|n| n.children.len()), Some(2));
	assert_eq!(counts(&ShoppingList::aggregate(&tree, &OwnedMarks::new(), &DirectObtainMarks::new())), [("D", 2), ("E", 2), ("F", 1)]);
}

#[test]
fn cycles_terminate() {
	let db = breedtree_test_utils::get_recipedb(None).expect("failed to read recipes");

	/* Direct self reference */
	let tree = build(&db, "ドラゴン", false);
	let repeated = tree.find("ドラゴン:1").expect("missing node");
	assert_eq!(repeated.name, "ドラゴン");
	assert!(repeated.is_leaf());

	/* Through another recipe */
	let tree = build(&db, "ゴーレム", false);
	assert!(tree.find("ストーンマン:0/ゴーレム:0").expect("missing node").is_leaf());
	assert!(depth(&tree) <= db.len());
}

#[test]
fn builds_are_deterministic() {
	let db = breedtree_test_utils::get_recipedb(None).expect("failed to read recipes");
	for root in db.names() {
		for meguriai in [false, true] {
			assert_eq!(build(&db, root, meguriai), build(&db, root, meguriai));
		}
	}
}

#[test]
fn base_duplicates_look_the_same_either_way() {
	let db = db(r#"{"A": [["B", "C"]], "B": [["D", "D"]], "C": []}"#);
	for meguriai in [false, true] {
		let tree = build(&db, "A", meguriai);
		assert_eq!(tree.children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), ["B", "C"]);
		let b = &tree.children[0];
		assert_eq!(b.children.iter().map(|c| c.path.as_str()).collect::<Vec<_>>(), ["B:0/D:0", "B:0/D:1"]);
		assert!(b.children.iter().all(DisplayTreeNode::is_leaf));
		assert!(tree.children[1].is_leaf());

		let list = ShoppingList::aggregate(&tree, &OwnedMarks::new(), &DirectObtainMarks::new());
		assert_eq!(counts(&list), [("D", 2), ("C", 1)]);
	}
}

#[test]
fn collapsed_duplicates_still_count() {
	let db = db(r#"{"A": [["B", "B"]], "B": []}"#);
	let tree = build(&db, "A", true);
	assert_eq!(tree.children.len(), 2);
	assert!(tree.children.iter().all(DisplayTreeNode::is_leaf));
	let list = ShoppingList::aggregate(&tree, &OwnedMarks::new(), &DirectObtainMarks::new());
	assert_eq!(counts(&list), [("B", 2)]);
}

#[test]
fn owned_occurrence_counts_once() {
	let db = db(r#"{"A": [["B", "C"]], "B": [["X", "Y"]]}"#);
	let owned: OwnedMarks = [("B:0".to_string(), true)].into_iter().collect();
	let tree = build_display_tree("A", &owned, &DirectObtainMarks::new(), &db, true).unwrap();
	assert_eq!(tree.children[0].path, "B:0");
	assert!(tree.children[0].is_leaf());
	let list = ShoppingList::aggregate(&tree, &owned, &DirectObtainMarks::new());
	assert_eq!(counts(&list), [("B", 1), ("C", 1)]);
}

#[test]
fn owned_occurrence_does_not_collapse_later_ones() {
	let db = db(r#"{"A": [["B", "B"]], "B": [["X", "Y"]]}"#);
	let owned: OwnedMarks = [("B:0".to_string(), true)].into_iter().collect();
	let tree = build_display_tree("A", &owned, &DirectObtainMarks::new(), &db, true).unwrap();

	assert!(tree.find("B:0").expect("missing node").is_leaf());
	let second = tree.find("B:1").expect("missing node");
	assert_eq!(second.children.iter().map(|c| c.path.as_str()).collect::<Vec<_>>(), ["B:1/X:0", "B:1/Y:1"]);

	let list = ShoppingList::aggregate(&tree, &owned, &DirectObtainMarks::new());
	assert_eq!(counts(&list), [("B", 1), ("X", 1), ("Y", 1)]);
}

#[test]
fn aggregating_twice_gives_the_same_list() {
	let db = breedtree_test_utils::get_recipedb(None).expect("failed to read recipes");
	let owned: OwnedMarks = [("キングスライム:0".to_string(), true)].into_iter().collect();
	let direct: DirectObtainMarks = [("スライム".to_string(), true)].into_iter().collect();
	for meguriai in [false, true] {
		let tree = build_display_tree("メタルキング", &owned, &direct, &db, meguriai).unwrap();
		let first = ShoppingList::aggregate(&tree, &owned, &direct);
		let second = ShoppingList::aggregate(&tree, &owned, &direct);
		assert!(!first.is_empty());
		assert_eq!(first, second);
		assert_eq!(collect_leaves(&tree, &owned, &direct), collect_leaves(&tree, &owned, &direct));
	}
}
