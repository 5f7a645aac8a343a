//! Bounded backend/tool round loop for one turn.

use std::time::Duration;

use tracing::{debug, warn};

use super::ToolRegistry;
use crate::{AiClient, AiError, AiResponse, Message, Role, TokenUsage, ToolCall, ToolDefinition};

/// Final answer of one generation plus what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub content: String,
    /// Tool rounds executed before the final answer.
    pub rounds: u32,
    pub usage: TokenUsage,
}

/// Runs backend calls and the tool calls they request until a final answer
/// emerges or the round budget runs out.
pub struct ToolDispatcher {
    registry: ToolRegistry,
    tool_timeout: Duration,
    backend_timeout: Duration,
    max_rounds: u32,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            tool_timeout: Duration::from_secs(15),
            backend_timeout: Duration::from_secs(30),
            max_rounds: 5,
        }
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Execute one tool call. Always yields text.
    pub async fn invoke(&self, call: &ToolCall) -> String {
        let Some(tool) = self.registry.get(&call.name) else {
            warn!(tool = %call.name, "backend requested an unknown tool");
            return format!("Unknown tool '{}'", call.name);
        };

        debug!(tool = %call.name, args = %call.arguments, "invoking tool");
        match tokio::time::timeout(self.tool_timeout, tool.invoke(&call.arguments)).await {
            Ok(text) => text,
            Err(_) => {
                warn!(tool = %call.name, timeout = ?self.tool_timeout, "tool timed out");
                format!(
                    "Tool '{}' timed out after {}s",
                    call.name,
                    self.tool_timeout.as_secs()
                )
            }
        }
    }

    /// Send `prompt` and service tool requests until the backend answers.
    ///
    /// Backends that are not tool capable are sent no tool list, and any
    /// tool calls they return anyway are ignored.
    pub async fn drive(
        &self,
        client: &dyn AiClient,
        prompt: &str,
        tool_capable: bool,
    ) -> Result<Generation, AiError> {
        let tools = if tool_capable {
            self.registry.definitions()
        } else {
            Vec::new()
        };

        let mut scratch = vec![Message::new(Role::User, prompt)];
        let mut usage = TokenUsage::default();
        let mut rounds = 0;

        loop {
            let response = self.call_backend(client, &scratch, &tools).await?;
            usage.add(&response.usage);

            if response.tool_calls.is_empty() || tools.is_empty() {
                if response.content.trim().is_empty() {
                    return Err(AiError::EmptyResponse);
                }
                debug!(rounds, tokens = usage.total_tokens(), "generation complete");
                return Ok(Generation {
                    content: response.content,
                    rounds,
                    usage,
                });
            }

            if rounds >= self.max_rounds {
                warn!(max_rounds = self.max_rounds, "backend kept requesting tools");
                return Err(AiError::NoConvergence(self.max_rounds));
            }
            rounds += 1;

            scratch.push(Message::new(Role::Assistant, tool_request_text(&response)));
            for call in &response.tool_calls {
                let result = self.invoke(call).await;
                scratch.push(Message::new(
                    Role::Tool,
                    format!("[Tool Result: {}]\n{}", call.name, result),
                ));
            }
        }
    }

    async fn call_backend(
        &self,
        client: &dyn AiClient,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        tokio::time::timeout(self.backend_timeout, client.send_message(messages, tools))
            .await
            .map_err(|_| {
                warn!(timeout = ?self.backend_timeout, "backend call timed out");
                AiError::Timeout
            })?
    }
}

/// Assistant text for a tool-requesting round. Some backends reject empty
/// text parts, so a bare tool request gets a placeholder.
fn tool_request_text(response: &AiResponse) -> String {
    if !response.content.trim().is_empty() {
        return response.content.clone();
    }
    let names: Vec<&str> = response
        .tool_calls
        .iter()
        .map(|call| call.name.as_str())
        .collect();
    format!("[Calling tools: {}]", names.join(", "))
}
