//! Durable, append-only chat log.
//!
//! One SQLite table holds the whole conversation. Messages are never
//! updated or reordered; reads always come back oldest first.

mod message;
mod store;

#[cfg(test)]
mod tests;

pub use message::{MessageId, Role, StoredMessage};
pub use store::MessageStore;
