//! Storage configuration.
//!
//! Loads storage settings from the user's config directory. The file is
//! optional; a missing file means defaults. A file that exists but cannot be
//! parsed is an error rather than a silent fallback.

use maestro_core::error::{MaestroError, Result};
use maestro_core::roster::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage settings for the default stack.
///
/// ```toml
/// # ~/.config/maestro/config.toml
/// capacity = 5
/// # base_dir = "/some/other/place"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where blobs are stored; defaults to the platform data directory.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// How many composers stay active before eviction.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StorageConfig {
    /// Loads the config from `<config_dir>/maestro/config.toml`.
    ///
    /// # Returns
    ///
    /// - `Ok(config)`: parsed file, or defaults when the file (or the config
    ///   directory) does not exist
    /// - `Err(_)`: the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(Self::default());
        };
        Self::load_from(config_dir.join("maestro").join("config.toml"))
    }

    /// Loads the config from an explicit path; missing file means defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| MaestroError::store(format!("failed to read config {path:?}: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolves the blob directory: the configured override, or
    /// `<data_dir>/maestro`.
    pub fn resolve_base_dir(&self) -> Result<PathBuf> {
        if let Some(base_dir) = &self.base_dir {
            return Ok(base_dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("maestro"))
            .ok_or_else(|| MaestroError::store("cannot determine the platform data directory"))
    }
}
