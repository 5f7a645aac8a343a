//! Message store location.

use std::path::PathBuf;

use parley_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::toml_loader::AppDir;

const DEFAULT_DB_FILE: &str = "chat_history.db";

/// Where the conversation log lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct StorageConfig {
    /// Database file. Empty means the platform data directory.
    pub path: String,
}

impl StorageConfig {
    /// Resolve the database path, falling back to `<data_dir>/parley/chat_history.db`.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.path.trim().is_empty() {
            return Ok(PathBuf::from(self.path.trim()));
        }
        AppDir::Data.file(DEFAULT_DB_FILE)
    }
}
