//! `get_current_weather`, backed by wttr.in.

use async_trait::async_trait;
use tracing::debug;

use super::{required_str, Tool};
use crate::ToolDefinition;

/// Condition, temperature and wind in one line.
const WTTR_FORMAT: &str = "%C %t %w";

pub struct WeatherTool {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherTool {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, location: &str) -> Result<reqwest::Url, String> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid weather service URL '{}': {e}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| format!("Invalid weather service URL '{}'", self.base_url))?
            .pop_if_empty()
            .push(location);
        url.query_pairs_mut().append_pair("format", WTTR_FORMAT);
        Ok(url)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_current_weather".to_string(),
            description: "Get the current weather for a city or region.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City or region name, e.g. \"São Paulo\" or \"New York\""
                    }
                },
                "required": ["location"]
            }),
        }
    }

    async fn invoke(&self, args: &serde_json::Value) -> String {
        let location = match required_str(args, "location") {
            Ok(location) => location,
            Err(message) => return message,
        };
        let url = match self.url_for(location) {
            Ok(url) => url,
            Err(message) => return message,
        };

        debug!(%location, "weather lookup");

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => return format!("Error connecting to the weather service: {e}"),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return format!(
                "Could not get the weather for {location}. Status: {}",
                status.as_u16()
            );
        }

        match response.text().await {
            Ok(text) => format!("Weather in {location}: {}", text.trim()),
            Err(e) => format!("Error connecting to the weather service: {e}"),
        }
    }
}
