//! Tools the backend can call mid-turn.
//!
//! A tool never fails from the caller's point of view: every problem
//! (bad arguments, HTTP errors, timeouts) comes back as text that is fed
//! to the backend like any other result.

mod definitions;
mod dispatcher;
mod quote;
mod registry;
mod weather;


use async_trait::async_trait;

use crate::ToolDefinition;

pub use definitions::{to_gemini_tool, to_openai_tool};
pub use dispatcher::{Generation, ToolDispatcher};
pub use quote::StockQuoteTool;
pub use registry::ToolRegistry;
pub use weather::WeatherTool;

#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and JSON-schema parameters shown to the backend.
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Failures are described in the returned text.
    async fn invoke(&self, args: &serde_json::Value) -> String;
}

/// Fetch a required, non-blank string argument.
pub(crate) fn required_str<'a>(
    args: &'a serde_json::Value,
    name: &str,
) -> Result<&'a str, String> {
    match args.get(name) {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s.trim()),
        Some(serde_json::Value::String(_)) | None | Some(serde_json::Value::Null) => {
            Err(format!("Missing required argument '{name}'"))
        }
        Some(other) => Err(format!(
            "Invalid argument '{name}': expected a string, got {other}"
        )),
    }
}
