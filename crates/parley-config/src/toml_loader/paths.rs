//! Platform locations of Parley's files.

use std::path::{Path, PathBuf};

use parley_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "parley";
const CONFIG_FILE: &str = "config.toml";

/// Per-user directories Parley keeps files under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Holds `config.toml` and an optional `.env`.
    Config,
    /// Holds the message database.
    Data,
}

impl AppDir {
    fn label(self) -> &'static str {
        match self {
            AppDir::Config => "config",
            AppDir::Data => "data",
        }
    }

    /// `<platform dir>/parley`, or a `PathError` on platforms without one.
    pub fn resolve(self) -> Result<PathBuf, ConfigError> {
        let base = match self {
            AppDir::Config => dirs::config_dir(),
            AppDir::Data => dirs::data_dir(),
        };
        base.map(|dir| dir.join(APP_DIR)).ok_or_else(|| {
            ConfigError::PathError(format!("could not determine the {} directory", self.label()))
        })
    }

    pub fn file(self, name: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.resolve()?.join(name))
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    AppDir::Config.file(CONFIG_FILE)
}

/// Write the commented default config, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let path_error = |action: &str, target: &Path, e: std::io::Error| {
        ConfigError::PathError(format!("failed to {action} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| path_error("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| path_error("write", path, e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}
