//! Google Gemini API client.
//!
//! Implements the `AiClient` trait for Gemini models via the
//! `generateContent` endpoint, with function declarations for tools.

mod api;
mod client;
mod config;

pub use client::GeminiClient;
pub use config::GeminiConfig;
