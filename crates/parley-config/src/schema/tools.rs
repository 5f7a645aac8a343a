//! Built-in tool configuration.

use serde::{Deserialize, Serialize};

/// Weather lookup via wttr.in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherToolConfig {
    pub enabled: bool,
    pub base_url: String,
}

impl Default for WeatherToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://wttr.in".into(),
        }
    }
}

/// Market quote lookup via the Yahoo Finance chart API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteToolConfig {
    pub enabled: bool,
    pub base_url: String,
}

impl Default for QuoteToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://query1.finance.yahoo.com".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ToolsConfig {
    pub weather: WeatherToolConfig,
    pub quote: QuoteToolConfig,
}
