//! Session configuration: context window, tool rounds and persona.

use serde::{Deserialize, Serialize};

/// Persona preamble placed at the top of every prompt.
pub const DEFAULT_PERSONA: &str = "\
You are a Senior Software Engineer and Senior Technical Mentor.
Always answer in Brazilian Portuguese.
For programming questions: follow Clean Code, SOLID and good practices.
For weather questions: use the get_current_weather tool.
For stock questions: use the get_stock_quote tool.
For currency quotes: use get_stock_quote with the ticker 'BRL=X' for the Dollar and 'EURBRL=X' for the Euro.
Be direct and professional, but friendly.
Use tables and markdown to format your answers nicely.";

/// Per-turn session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of persisted messages included in each prompt (valid range: 1-200).
    pub context_window: u32,
    /// Tool rounds allowed before a turn is declared non-convergent (valid range: 1-20).
    pub max_tool_rounds: u32,
    pub persona: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            context_window: 10,
            max_tool_rounds: 5,
            persona: DEFAULT_PERSONA.into(),
        }
    }
}
