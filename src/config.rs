use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::buffer::{DEFAULT_LINE_GAP, DEFAULT_LINE_SLOTS};
use crate::paths;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("read config file failed: {}", path.display())]
	Read {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("parse config failed")]
	Parse {
		#[source]
		source: toml::de::Error,
	},
	#[error("invalid config: {field} must be greater than zero")]
	Invalid { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Spaces a tab expands to on screen.
	pub tab_size:           usize,
	/// Line table slots reserved up front.
	pub initial_lines:      usize,
	/// Capacity of a fresh empty line.
	pub initial_line_bytes: usize,
	pub status:             StatusConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
	/// Help text at the right end of the status line.
	pub commands: String,
	/// Shown while the buffer has unsaved changes.
	pub modified: String,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			tab_size:           4,
			initial_lines:      DEFAULT_LINE_SLOTS,
			initial_line_bytes: DEFAULT_LINE_GAP,
			status:             StatusConfig::default(),
		}
	}
}

impl Default for StatusConfig {
	fn default() -> Self {
		Self { commands: "Ctrl+Q-quit Ctrl+S-Save".to_string(), modified: "changed".to_string() }
	}
}

impl EditorConfig {
	/// Loads `explicit` if given, otherwise the per-user config file.
	///
	/// A missing per-user file means defaults; a missing explicit file is an error.
	pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		let (path, required) = match explicit {
			Some(path) => (path.to_path_buf(), true),
			None => (user_config_path(), false),
		};

		let text = match std::fs::read_to_string(&path) {
			Ok(text) => text,
			Err(source) if !required && source.kind() == io::ErrorKind::NotFound => {
				debug!("no config at {}, using defaults", path.display());
				return Ok(Self::default());
			}
			Err(source) => return Err(ConfigError::Read { path, source }),
		};

		let config = Self::from_toml(&text)?;
		info!("config loaded from {}", path.display());
		Ok(config)
	}

	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse { source })?;
		config.validate()
	}

	fn validate(self) -> Result<Self, ConfigError> {
		if self.tab_size == 0 {
			return Err(ConfigError::Invalid { field: "tab_size" });
		}
		if self.initial_lines == 0 {
			return Err(ConfigError::Invalid { field: "initial_lines" });
		}
		if self.initial_line_bytes == 0 {
			return Err(ConfigError::Invalid { field: "initial_line_bytes" });
		}
		Ok(self)
	}
}

fn user_config_path() -> PathBuf {
	paths::config_dir().join("config.toml")
}
