//! Token usage tracking per backend.

use std::collections::HashMap;

use parley_common::BackendKind;

use crate::TokenUsage;

/// Tracks cumulative token usage per backend for one session.
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    /// Total usage across all backends.
    total: TokenUsage,
    by_backend: HashMap<BackendKind, TokenUsage>,
    /// Number of completed generations.
    generations: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage of one completed generation.
    pub fn record(&mut self, backend: BackendKind, usage: &TokenUsage) {
        self.total.add(usage);
        self.generations += 1;
        self.by_backend.entry(backend).or_default().add(usage);
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Usage for one backend; zero if it was never used.
    pub fn for_backend(&self, backend: BackendKind) -> TokenUsage {
        self.by_backend.get(&backend).copied().unwrap_or_default()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn generation_count(&self) -> u64 {
        self.generations
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
