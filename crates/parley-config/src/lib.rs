//! Parley configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box. Credentials
//! are never part of the config; each backend section only names the
//! environment variable that holds its key.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parley_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("context window: {}", config.session.context_window);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ParleyConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use parley_common::ConfigError;

/// Load and validate config.
///
/// With `path` set, the file must exist. Otherwise `config.toml` is loaded
/// from the OS config directory, and a commented default is created if
/// none exists.
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
