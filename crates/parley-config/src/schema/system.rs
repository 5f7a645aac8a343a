//! System configuration types: timeouts and logging.

use serde::{Deserialize, Serialize};

/// Upper bounds on external calls, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    /// Per backend request (valid range: 1-300).
    pub backend_secs: u32,
    /// Per tool invocation (valid range: 1-300).
    pub tool_secs: u32,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            backend_secs: 30,
            tool_secs: 15,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the parley crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "parley=trace",
            LogLevel::Debug => "parley=debug",
            LogLevel::Info => "parley=info",
            LogLevel::Warn => "parley=warn",
            LogLevel::Error => "parley=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
