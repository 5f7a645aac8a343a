//! Conversation engine for Parley.
//!
//! Provides OpenAI and Gemini API clients plus everything needed to run
//! a chat turn end to end:
//! - Backend selection with cached clients and credential checks
//! - Tool calling with a bounded dispatch loop
//! - Prompt assembly from the persisted conversation window
//! - Turn orchestration that keeps the stored log strictly alternating
//! - Token usage tracking

pub mod context;
pub mod gemini;
pub mod openai;
pub mod router;
pub mod session;
pub mod token_tracker;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

pub use context::assemble;
pub use gemini::{GeminiClient, GeminiConfig};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use router::{BackendDescriptor, CredentialSource, EnvCredentials, ModelRouter, StaticCredentials};
pub use session::{SessionController, TurnError, TurnOutcome, TurnState, TurnStatus};
pub use token_tracker::TokenTracker;
pub use tools::{Generation, Tool, ToolDispatcher, ToolRegistry};

#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}

/// Backend failures. These never abort a turn; they are rendered into the
/// assistant reply instead.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Empty response from backend")]
    EmptyResponse,
    #[error("no convergent answer after {0} rounds")]
    NoConvergence(u32),
}

impl AiError {
    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else {
            AiError::NetworkError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_accumulates() {
        let mut total = TokenUsage::default();
        total.add(&TokenUsage {
            input_tokens: 10,
            output_tokens: 4,
        });
        total.add(&TokenUsage {
            input_tokens: 5,
            output_tokens: 1,
        });
        assert_eq!(total.input_tokens, 15);
        assert_eq!(total.total_tokens(), 20);
    }

    #[test]
    fn no_convergence_message_names_rounds() {
        assert_eq!(
            AiError::NoConvergence(5).to_string(),
            "no convergent answer after 5 rounds"
        );
    }
}
