//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use breedtree::progress::FileMarkStore;
use breedtree::RecipeDB;

/// The recipe file shipped in `test-data/recipes.json`.
pub const SAMPLE_RECIPES: &str = include_str!("../test-data/recipes.json");

/// Gets a RecipeDB for use in testing
/// # Parameters
/// - `json` - When present the db is read from it, if not [`SAMPLE_RECIPES`] is used
pub fn get_recipedb(json: Option<&str>) -> breedtree::Result<RecipeDB> {
	RecipeDB::from_json_str(json.unwrap_or(SAMPLE_RECIPES))
}

/// A [`FileMarkStore`] in a fresh temporary directory.
///
/// The store is only valid while the returned [`tempfile::TempDir`] is alive.
pub fn temp_mark_store() -> breedtree::Result<(tempfile::TempDir, FileMarkStore)> {
	let dir = tempfile::tempdir()?;
	let store = FileMarkStore::new(dir.path().join("marks"))?;
	Ok((dir, store))
}

/// Writes `json` to a recipe file inside `dir` and returns its path.
pub fn write_recipe_file(dir: &std::path::Path, json: &str) -> breedtree::Result<std::path::PathBuf> {
	let path = dir.join("recipes.json");
	std::fs::write(&path, json)?;
	Ok(path)
}
