//! Turn states, outcomes and errors.

use std::fmt;

use parley_common::{ConfigError, StorageError};
use parley_store::MessageId;

/// Where the controller is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Assembling,
    Generating,
    Persisting,
    Failed,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnState::Idle => "idle",
            TurnState::Assembling => "assembling",
            TurnState::Generating => "generating",
            TurnState::Persisting => "persisting",
            TurnState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How the assistant reply of a completed turn came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStatus {
    /// The backend produced an answer after `rounds` tool rounds.
    Answered { rounds: u32 },
    /// The backend failed; the reply is the rendered error.
    Degraded { error: String },
}

/// A completed turn: both messages are persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub user_id: MessageId,
    pub assistant_id: MessageId,
    pub reply: String,
    pub status: TurnStatus,
}

impl TurnOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, TurnStatus::Degraded { .. })
    }
}

/// Failures that abort a turn. Backend and tool failures never do.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
