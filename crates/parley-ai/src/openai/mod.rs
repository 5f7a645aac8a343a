//! OpenAI chat completions client.
//!
//! Implements the `AiClient` trait against `/chat/completions`, with
//! function tools. Any OpenAI-compatible server works via `base_url`.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
