//! Prompt assembly from the persisted conversation window.
//!
//! The prompt is rebuilt from storage on every turn, so a restarted
//! process sees exactly the same context as the one that wrote it.

use parley_store::StoredMessage;

const HISTORY_HEADER: &str = "Conversation history:";
const EMPTY_HISTORY: &str = "(no previous messages)";
const INSTRUCTION_HEADER: &str = "New user instruction:";
const CLOSING: &str = "Answer taking the conversation history above into account.";

/// Build the single prompt sent to the backend for one turn.
///
/// `window` must already be in ascending id order, as returned by
/// `MessageStore::recent_window`.
pub fn assemble(window: &[StoredMessage], persona: &str, new_input: &str) -> String {
    let mut prompt = String::with_capacity(
        persona.len()
            + new_input.len()
            + window.iter().map(|m| m.content.len() + 12).sum::<usize>()
            + 128,
    );

    prompt.push_str(persona.trim_end());
    prompt.push_str("\n\n");
    prompt.push_str(HISTORY_HEADER);
    prompt.push('\n');

    if window.is_empty() {
        prompt.push_str(EMPTY_HISTORY);
        prompt.push('\n');
    } else {
        for message in window {
            prompt.push_str(message.role.label());
            prompt.push_str(": ");
            prompt.push_str(&message.content);
            prompt.push('\n');
        }
    }

    prompt.push('\n');
    prompt.push_str(INSTRUCTION_HEADER);
    prompt.push('\n');
    prompt.push_str(new_input);
    prompt.push_str("\n\n");
    prompt.push_str(CLOSING);
    prompt
}
