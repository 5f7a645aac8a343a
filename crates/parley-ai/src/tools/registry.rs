//! Name-keyed set of available tools.

use std::sync::Arc;

use parley_config::schema::ToolsConfig;
use tracing::info;

use super::{StockQuoteTool, Tool, WeatherTool};
use crate::ToolDefinition;

/// Ordered set of tools, unique by name. Registration order is the order
/// definitions are offered to the backend.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in tools enabled in config.
    pub fn builtin(config: &ToolsConfig, http: reqwest::Client) -> Self {
        let mut registry = Self::new();
        if config.weather.enabled {
            registry.register(Arc::new(WeatherTool::new(
                http.clone(),
                config.weather.base_url.clone(),
            )));
        }
        if config.quote.enabled {
            registry.register(Arc::new(StockQuoteTool::new(
                http,
                config.quote.base_url.clone(),
            )));
        }
        info!(tools = ?registry.names(), "tool registry ready");
        registry
    }

    /// Add a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.definition().name;
        match self
            .tools
            .iter()
            .position(|existing| existing.definition().name == name)
        {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|tool| tool.definition().name == name)
            .cloned()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.definition().name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
