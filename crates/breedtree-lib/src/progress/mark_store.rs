//! Storage for persisted marks.
//!
//! The registry hands a [`MarkStore`] opaque keys and JSON strings, the store only has to keep them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait MarkStore {
	/// Returns `None` when nothing was saved under `key`.
	fn load(&self, key: &str) -> crate::Result<Option<String>>;
	fn save(&mut self, key: &str, value: &str) -> crate::Result<()>;
}

/// Keeps each key in its own `<key>.json` file in a directory.
#[derive(Debug, Clone)]
pub struct FileMarkStore {
	dir: PathBuf,
}

impl FileMarkStore {
	/// Creates the directory if needed.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the directory can't be created.
	pub fn new(dir: impl Into<PathBuf>) -> crate::Result<Self> {
		let dir = dir.into();
		std::fs::create_dir_all(&dir)?;
		Ok(Self { dir })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn key_path(&self, key: &str) -> PathBuf {
		self.dir.join(format!("{}.json", key))
	}
}

impl MarkStore for FileMarkStore {
	fn load(&self, key: &str) -> crate::Result<Option<String>> {
		match std::fs::read_to_string(self.key_path(key)) {
			Ok(s) => Ok(Some(s)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	fn save(&mut self, key: &str, value: &str) -> crate::Result<()> {
		let path = self.key_path(key);
		log::trace!("Writing {}", path.display());
		std::fs::write(path, value)?;
		Ok(())
	}
}

#[derive(Debug, Clone, Default)]
pub struct MemoryMarkStore {
	values: HashMap<String, String>,
}

impl MemoryMarkStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl MarkStore for MemoryMarkStore {
	fn load(&self, key: &str) -> crate::Result<Option<String>> {
		Ok(self.values.get(key).cloned())
	}

	fn save(&mut self, key: &str, value: &str) -> crate::Result<()> {
		self.values.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}
