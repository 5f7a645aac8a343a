use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// The closed set of language-model backends Parley can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BackendKind {
    #[default]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gemini-flash")]
    GeminiFlash,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Gpt4o, BackendKind::GeminiFlash];

    /// Short key used in config files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            BackendKind::Gpt4o => "gpt-4o",
            BackendKind::GeminiFlash => "gemini-flash",
        }
    }

    /// Human-facing name shown to the user.
    pub fn logical_name(&self) -> &'static str {
        match self {
            BackendKind::Gpt4o => "GPT-4o",
            BackendKind::GeminiFlash => "Gemini Flash Latest",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logical_name())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    /// Accepts either the key or the logical name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BackendKind::ALL
            .into_iter()
            .find(|kind| {
                kind.key().eq_ignore_ascii_case(wanted)
                    || kind.logical_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ConfigError::UnknownBackend(wanted.to_string()))
    }
}
