//! Viewer configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the TOML mapping for us.
//! `#[serde(default)]` fills any missing field from `Default::default()`,
//! so a config file only needs the keys the user wants to change.
//!
//! Display preferences (dark mode, zoom, ...) are not here: they change on
//! every toggle and live in the [`Store`](crate::store::Store) instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File loading limits
    pub files: FileConfig,

    /// Highlighting limits
    pub highlight: HighlightConfig,
}

impl Config {
    /// Loads config from the default location.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to default config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("peek").join("config.toml"))
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// File loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Files larger than this are refused (bytes)
    pub max_file_size_bytes: u64,

    /// Images whose decoded RGBA size exceeds this are refused (bytes)
    pub max_image_texture_bytes: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10_000_000,
            max_image_texture_bytes: 128 * 1024 * 1024,
        }
    }
}

/// Highlighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Documents with more characters than this render without syntax colors
    pub max_highlight_chars: usize,

    /// Documents of at least this many bytes are "large": no colors and
    /// no line numbers
    pub large_text_bytes: usize,

    /// Documents of at least this many lines are "large" too
    pub large_text_lines: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_highlight_chars: 200_000,
            large_text_bytes: 500_000,
            large_text_lines: 50_000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
