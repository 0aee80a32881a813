//! User configuration.
//!
//! Saved as JSON in the platform config directory, see [`Config::config_file_path()`].

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	data_dir: PathBuf,
	recipe_path: Option<PathBuf>,
}

/// Resolves a base directory from an XDG variable, falling back to `$HOME/<home_relative>`.
#[cfg(not(target_os = "windows"))]
fn platform_dir(xdg_var: &str, home_relative: &str) -> PathBuf {
	if let Ok(e) = std::env::var(xdg_var) {
		PathBuf::from(e)
	} else if let Ok(home) = std::env::var("HOME") {
		PathBuf::from(home).join(home_relative)
	} else {
		log::warn!("Neither {} nor HOME is set, using the working directory.", xdg_var);
		PathBuf::from(".")
	}
}

#[cfg(target_os = "windows")]
fn platform_dir(_xdg_var: &str, _home_relative: &str) -> PathBuf {
	if let Ok(e) = std::env::var("APPDATA") {
		PathBuf::from(e)
	} else {
		log::warn!("APPDATA is not set, using the working directory.");
		PathBuf::from(".")
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: platform_dir("XDG_DATA_HOME", ".local/share").join("breedtree"),
			recipe_path: None,
		}
	}
}

impl Config {
	/// Where [`load_from_disk()`](Config::load_from_disk()) and [`save_to_disk()`](Config::save_to_disk()) look.
	pub fn config_file_path() -> PathBuf {
		platform_dir("XDG_CONFIG_HOME", ".config").join("breedtree").join("config.json")
	}

	/// Loads the config from the default location.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the file is missing or unreadable.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when the file is not a valid config.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::config_file_path())
	}

	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path.as_ref())?;
		let config = serde_json::from_reader(std::io::BufReader::new(file))?;
		log::debug!("Loaded config from {}", path.as_ref().display());
		Ok(config)
	}

	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::config_file_path())
	}

	pub fn save_to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		log::info!("Saved config to {}", path.display());
		Ok(())
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}

	/// Unlike [`set_recipe_path()`](Self::set_recipe_path) the directory does not have to exist yet, it is created on first save.
	pub fn set_data_dir(&mut self, data_dir: PathBuf) {
		self.data_dir = data_dir;
	}

	/// Directory holding the persisted marks.
	pub fn mark_store_dir(&self) -> PathBuf {
		self.data_dir.join("marks")
	}

	pub fn recipe_path(&self) -> Option<&Path> {
		self.recipe_path.as_deref()
	}
	/// returns if the file is valid or not.
	pub fn set_recipe_path(&mut self, recipe_path: PathBuf) -> bool {
		if recipe_path.is_file() {
			self.recipe_path = Some(recipe_path);
			true
		} else {
			false
		}
	}
}
