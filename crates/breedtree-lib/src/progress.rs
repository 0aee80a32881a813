//! Per-root progress and the marks shared by every root.
//!
//! Each root a user has started on keeps its own [`OwnedMarks`] and [`LineageMarks`],
//! tree paths are only meaningful inside one root's tree.
//! [`DirectObtainMarks`] and the meguriai setting are global.
//!
//! The registry does no IO by itself, call [`ProgressRegistry::save_to_store()`] after changes.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Deserialize};

use crate::build_session::BuildRequest;
use crate::marks::{DirectObtainMarks, LineageMarks, LineageTag, OwnedMarks};
use crate::RecipeDB;

mod mark_store;
pub use mark_store::{MarkStore, FileMarkStore, MemoryMarkStore};

pub const OWNED_KEY: &str = "breedtree_owned";
pub const DIRECT_OBTAIN_KEY: &str = "breedtree_direct_obtain";
pub const LINEAGE_KEY: &str = "breedtree_lineage";
pub const MEGURIAI_KEY: &str = "breedtree_meguriai";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootProgress {
	pub owned: OwnedMarks,
	pub lineage: LineageMarks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRegistry {
	/// In order of first selection.
	roots: IndexMap<String, RootProgress>,
	direct_obtain: DirectObtainMarks,
	meguriai_enabled: bool,
	active: Option<String>,
}

impl ProgressRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/* Roots */

	/// Makes `root` the active root, starting empty progress for it if there is none.
	///
	/// # Errors
	/// - [`InvalidArgument`](crate::error::Error::InvalidArgument) if `root` is empty.
	pub fn select_root(&mut self, root: &str) -> crate::Result<&mut RootProgress> {
		if root.is_empty() {
			return Err(crate::Error::InvalidArgument("root name must not be empty".to_string()));
		}
		if !self.roots.contains_key(root) {
			log::debug!("Starting progress for {}", root);
		}
		self.active = Some(root.to_owned());
		Ok(self.roots.entry(root.to_owned()).or_default())
	}

	/// Makes an existing root the active one without touching any progress.
	///
	/// # Errors
	/// - [`NotFound`](crate::error::Error::NotFound) if `root` has no progress.
	pub fn switch_root(&mut self, root: &str) -> crate::Result<()> {
		if !self.roots.contains_key(root) {
			return Err(crate::Error::NotFound(format!("no progress for {}", root)));
		}
		self.active = Some(root.to_owned());
		Ok(())
	}

	pub fn clear_selection(&mut self) {
		self.active = None;
	}

	pub fn active_root(&self) -> Option<&str> {
		self.active.as_deref()
	}

	pub fn active_progress(&self) -> Option<&RootProgress> {
		self.active.as_deref().and_then(|r| self.roots.get(r))
	}

	fn active_progress_mut(&mut self) -> crate::Result<&mut RootProgress> {
		let root = self.active.as_deref().ok_or_else(|| crate::Error::InvalidArgument("no root selected".to_string()))?;
		self.roots.get_mut(root).ok_or_else(|| crate::Error::NotFound(format!("no progress for {}", root)))
	}

	pub fn progress(&self, root: &str) -> Option<&RootProgress> {
		self.roots.get(root)
	}

	/// Roots with progress, in the order they were first selected.
	pub fn in_progress_roots(&self) -> impl Iterator<Item = &str> {
		self.roots.keys().map(String::as_str)
	}

	/// Drops the owned and lineage marks of `root`. Other roots and global marks are untouched.
	///
	/// Returns `false` when `root` had no progress.
	pub fn delete_root(&mut self, root: &str) -> bool {
		let removed = self.roots.shift_remove(root).is_some();
		if self.active.as_deref() == Some(root) {
			self.active = None;
		}
		if removed {
			log::info!("Deleted progress for {}", root);
		}
		removed
	}

	/* Marks */

	/// Flips the owned mark on `path` in the active root, returns the new value.
	///
	/// # Errors
	/// - [`InvalidArgument`](crate::error::Error::InvalidArgument) if no root is selected.
	pub fn toggle_owned(&mut self, path: &str) -> crate::Result<bool> {
		Ok(self.active_progress_mut()?.owned.toggle(path))
	}

	/// Advances the lineage tag on `path` in the active root, returns the new tag.
	///
	/// # Errors
	/// - [`InvalidArgument`](crate::error::Error::InvalidArgument) if no root is selected.
	pub fn cycle_lineage(&mut self, path: &str) -> crate::Result<LineageTag> {
		Ok(self.active_progress_mut()?.lineage.cycle(path))
	}

	pub fn toggle_direct_obtain(&mut self, name: &str) -> bool {
		self.direct_obtain.toggle(name)
	}

	pub fn direct_obtain(&self) -> &DirectObtainMarks {
		&self.direct_obtain
	}

	pub fn meguriai_enabled(&self) -> bool {
		self.meguriai_enabled
	}

	pub fn set_meguriai_enabled(&mut self, enabled: bool) {
		self.meguriai_enabled = enabled;
	}

	/// Snapshots the marks of the active root into a request for a [`BuildSession`](crate::build_session::BuildSession).
	///
	/// # Errors
	/// - [`InvalidArgument`](crate::error::Error::InvalidArgument) if no root is selected.
	pub fn build_request(&self, store: Arc<RecipeDB>) -> crate::Result<BuildRequest> {
		let root = self.active.as_deref().ok_or_else(|| crate::Error::InvalidArgument("no root selected".to_string()))?;
		let owned = self.roots.get(root).map(|p| p.owned.clone()).unwrap_or_default();
		Ok(BuildRequest {
			root: root.to_owned(),
			owned,
			direct_obtain: self.direct_obtain.clone(),
			meguriai_enabled: self.meguriai_enabled,
			store,
		})
	}

	/* Serialization */

	/// Reads every key from `store`, missing keys start empty.
	///
	/// # Errors
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when a saved value is malformed.
	/// - Any error returned by the store.
	pub fn load_from_store(store: &impl MarkStore) -> crate::Result<Self> {
		let owned: IndexMap<String, OwnedMarks> = load_json(store, OWNED_KEY)?.unwrap_or_default();
		let lineage: IndexMap<String, LineageMarks> = load_json(store, LINEAGE_KEY)?.unwrap_or_default();
		let direct_obtain: DirectObtainMarks = load_json(store, DIRECT_OBTAIN_KEY)?.unwrap_or_default();
		let meguriai_enabled = match store.load(MEGURIAI_KEY)? {
			Some(s) => s.trim() == "true",
			None => false,
		};

		let mut roots = IndexMap::<String, RootProgress>::new();
		for (root, marks) in owned {
			roots.entry(root).or_default().owned = marks;
		}
		for (root, marks) in lineage {
			roots.entry(root).or_default().lineage = marks;
		}

		log::info!("Loaded progress for {} roots", roots.len());
		Ok(Self {
			roots,
			direct_obtain,
			meguriai_enabled,
			active: None,
		})
	}

	/// Writes every key to `store`. The active selection is not saved.
	pub fn save_to_store(&self, store: &mut impl MarkStore) -> crate::Result<()> {
		let owned: IndexMap<&str, &OwnedMarks> = self.roots.iter().map(|(k, p)| (k.as_str(), &p.owned)).collect();
		let lineage: IndexMap<&str, &LineageMarks> = self.roots.iter().map(|(k, p)| (k.as_str(), &p.lineage)).collect();

		store.save(OWNED_KEY, &serde_json::to_string(&owned)?)?;
		store.save(LINEAGE_KEY, &serde_json::to_string(&lineage)?)?;
		store.save(DIRECT_OBTAIN_KEY, &serde_json::to_string(&self.direct_obtain)?)?;
		store.save(MEGURIAI_KEY, if self.meguriai_enabled { "true" } else { "false" })?;
		log::debug!("Saved progress for {} roots", self.roots.len());
		Ok(())
	}
}

fn load_json<T: serde::de::DeserializeOwned>(store: &impl MarkStore, key: &str) -> crate::Result<Option<T>> {
	match store.load(key)? {
		Some(s) => Ok(Some(serde_json::from_str(&s)?)),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn select_creates_once() {
		let mut registry = ProgressRegistry::new();
		registry.select_root("A").unwrap();
		registry.toggle_owned("B:0").unwrap();
		registry.select_root("A").unwrap();
		assert!(registry.active_progress().unwrap().owned.is_owned("B:0"));
		assert_eq!(registry.in_progress_roots().collect::<Vec<_>>(), ["A"]);
	}

	#[test]
	fn marks_need_a_selection() {
		let mut registry = ProgressRegistry::new();
		assert!(matches!(registry.toggle_owned("B:0"), Err(crate::Error::InvalidArgument(_))));
		assert!(matches!(registry.cycle_lineage("B:0"), Err(crate::Error::InvalidArgument(_))));
		assert!(matches!(registry.switch_root("A"), Err(crate::Error::NotFound(_))));
		assert!(matches!(registry.select_root(""), Err(crate::Error::InvalidArgument(_))));
	}

	#[test]
	fn delete_only_touches_one_root() {
		let mut registry = ProgressRegistry::new();
		registry.select_root("A").unwrap();
		registry.toggle_owned("X:0").unwrap();
		registry.select_root("B").unwrap();
		registry.toggle_owned("Y:0").unwrap();
		registry.cycle_lineage("Y:0").unwrap();
		registry.toggle_direct_obtain("Slime");

		assert!(registry.delete_root("B"));
		assert_eq!(registry.active_root(), None);
		assert!(registry.progress("B").is_none());
		assert!(registry.progress("A").unwrap().owned.is_owned("X:0"));
		assert!(registry.direct_obtain().is_direct_obtain("Slime"));
		assert!(!registry.delete_root("B"));
	}

	#[test]
	fn delete_keeps_order_of_the_rest() {
		let mut registry = ProgressRegistry::new();
		for root in ["A", "B", "C", "D"] {
			registry.select_root(root).unwrap();
		}
		registry.switch_root("C").unwrap();
		assert!(registry.delete_root("B"));
		assert_eq!(registry.in_progress_roots().collect::<Vec<_>>(), ["A", "C", "D"]);
		assert_eq!(registry.active_root(), Some("C"));
	}

	#[test]
	fn switching_keeps_progress() {
		let mut registry = ProgressRegistry::new();
		registry.select_root("A").unwrap();
		registry.toggle_owned("X:0").unwrap();
		registry.select_root("B").unwrap();
		registry.switch_root("A").unwrap();
		assert_eq!(registry.active_root(), Some("A"));
		assert!(registry.active_progress().unwrap().owned.is_owned("X:0"));
		assert!(registry.active_progress().unwrap().lineage == LineageMarks::new());
	}

	#[test]
	fn build_request_snapshots_active_root() {
		let mut registry = ProgressRegistry::new();
		registry.set_meguriai_enabled(true);
		registry.select_root("A").unwrap();
		registry.toggle_owned("B:0").unwrap();
		let request = registry.build_request(Arc::new(RecipeDB::new())).unwrap();
		registry.toggle_owned("B:0").unwrap();

		assert_eq!(request.root, "A");
		assert!(request.owned.is_owned("B:0"));
		assert!(request.meguriai_enabled);
	}

	#[test]
	fn store_round_trip_keeps_root_order() {
		let mut registry = ProgressRegistry::new();
		for root in ["Zeta", "Alpha", "Mid"] {
			registry.select_root(root).unwrap();
			registry.toggle_owned("P:0").unwrap();
		}
		registry.cycle_lineage("P:0").unwrap();
		registry.toggle_direct_obtain("Slime");
		registry.set_meguriai_enabled(true);

		let mut store = MemoryMarkStore::new();
		registry.save_to_store(&mut store).unwrap();
		let loaded = ProgressRegistry::load_from_store(&store).unwrap();

		assert_eq!(loaded.in_progress_roots().collect::<Vec<_>>(), ["Zeta", "Alpha", "Mid"]);
		assert_eq!(loaded.progress("Mid").unwrap().lineage.get("P:0"), LineageTag::A);
		assert!(loaded.direct_obtain().is_direct_obtain("Slime"));
		assert!(loaded.meguriai_enabled());
		assert_eq!(loaded.active_root(), None);
	}

	#[test]
	fn empty_store_loads_defaults() {
		let loaded = ProgressRegistry::load_from_store(&MemoryMarkStore::new()).unwrap();
		assert_eq!(loaded, ProgressRegistry::new());
	}
}
