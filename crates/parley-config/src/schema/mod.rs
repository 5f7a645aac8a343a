//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod models;
mod session;
mod storage;
mod system;
mod tools;

pub use models::*;
pub use session::*;
pub use storage::*;
pub use system::*;
pub use tools::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Parley.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ParleyConfig {
    pub session: SessionConfig,
    pub models: ModelsConfig,
    pub storage: StorageConfig,
    pub timeouts: TimeoutsConfig,
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}
