//! Backend selection and per-backend connection settings.

use parley_common::BackendKind;
use serde::{Deserialize, Serialize};

/// Connection settings for one backend, independent of which section they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key.
    pub credential_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Whether tool definitions are sent to this backend.
    pub tools: bool,
}

/// OpenAI chat-completions backend (`gpt-4o`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiModelConfig {
    pub model: String,
    pub base_url: String,
    pub credential_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub tools: bool,
}

impl Default for OpenAiModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1".into(),
            credential_env: "OPENAI_API_KEY".into(),
            max_tokens: 4096,
            temperature: 0.7,
            tools: true,
        }
    }
}

/// Gemini generateContent backend (`gemini-flash`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiModelConfig {
    pub model: String,
    pub base_url: String,
    pub credential_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub tools: bool,
}

impl Default for GeminiModelConfig {
    fn default() -> Self {
        Self {
            model: "gemini-flash-latest".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            credential_env: "GOOGLE_API_KEY".into(),
            max_tokens: 4096,
            temperature: 0.7,
            tools: true,
        }
    }
}

/// Model configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Backend used for new turns until switched.
    pub active: BackendKind,
    pub openai: OpenAiModelConfig,
    pub gemini: GeminiModelConfig,
}

impl ModelsConfig {
    /// Settings for the given backend.
    pub fn settings(&self, kind: BackendKind) -> BackendSettings {
        match kind {
            BackendKind::Gpt4o => BackendSettings {
                model: self.openai.model.clone(),
                base_url: self.openai.base_url.clone(),
                credential_env: self.openai.credential_env.clone(),
                max_tokens: self.openai.max_tokens,
                temperature: self.openai.temperature,
                tools: self.openai.tools,
            },
            BackendKind::GeminiFlash => BackendSettings {
                model: self.gemini.model.clone(),
                base_url: self.gemini.base_url.clone(),
                credential_env: self.gemini.credential_env.clone(),
                max_tokens: self.gemini.max_tokens,
                temperature: self.gemini.temperature,
                tools: self.gemini.tools,
            },
        }
    }
}
