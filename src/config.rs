//! Configuration
//!
//! Loaded from `./flashcards.toml` or `<config dir>/flashcards/flashcards.toml`.
//! Every field has a default, so a missing file is not an error.

use crate::error::{Result, StudyError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "flashcards.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding review state
    pub database_path: PathBuf,

    /// JSON card catalog
    pub catalog_path: PathBuf,

    /// Fixed shuffle seed; random order when unset
    pub seed: Option<u64>,

    /// env_logger filter, e.g. "info" or "flashcards_app=debug"
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            catalog_path: PathBuf::from("flashcards.json"),
            seed: None,
            log_level: None,
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashcards")
        .join("reviews.sqlite3")
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. flashcards.toml in current directory
    /// 3. <config dir>/flashcards/flashcards.toml
    /// 4. Defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("flashcards").join(CONFIG_FILE));
        }

        for candidate in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => {
                    info!("Loaded config from {}", candidate.display());
                    return Ok(config);
                }
                Err(e) => warn!("Failed to load {}: {}", candidate.display(), e),
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| StudyError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
            .map_err(|e| StudyError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
