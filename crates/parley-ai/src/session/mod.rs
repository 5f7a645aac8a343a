//! Turn orchestration over the persisted conversation.
//!
//! A `SessionController` owns the store, the router and the tool
//! dispatcher for one conversation and runs turns one at a time.

mod controller;
mod types;


pub use controller::SessionController;
pub use types::{TurnError, TurnOutcome, TurnState, TurnStatus};
