//! SessionController: one conversation, one turn at a time.

use parley_common::{BackendKind, StorageError};
use parley_config::schema::DEFAULT_PERSONA;
use parley_config::ParleyConfig;
use parley_store::{MessageStore, Role as StoredRole, StoredMessage};
use tracing::{debug, info, warn};

use crate::context::assemble;
use crate::router::ModelRouter;
use crate::token_tracker::TokenTracker;
use crate::tools::ToolDispatcher;
use crate::AiError;

use super::types::{TurnError, TurnOutcome, TurnState, TurnStatus};

/// Stored in place of the answer a crashed turn never produced.
const INTERRUPTED_REPLY: &str =
    "(No answer was recorded for this message: the previous turn was interrupted.)";

/// Owns the session: store, router, tool dispatcher, usage and the active
/// backend. Nothing here is process-global.
pub struct SessionController {
    store: MessageStore,
    router: ModelRouter,
    dispatcher: ToolDispatcher,
    tracker: TokenTracker,
    active: BackendKind,
    persona: String,
    context_window: usize,
    state: TurnState,
}

impl SessionController {
    pub fn new(store: MessageStore, router: ModelRouter, dispatcher: ToolDispatcher) -> Self {
        Self {
            store,
            router,
            dispatcher,
            tracker: TokenTracker::new(),
            active: BackendKind::default(),
            persona: DEFAULT_PERSONA.to_string(),
            context_window: 10,
            state: TurnState::Idle,
        }
    }

    /// Controller with persona, window and active backend taken from config.
    pub fn from_config(
        config: &ParleyConfig,
        store: MessageStore,
        router: ModelRouter,
        dispatcher: ToolDispatcher,
    ) -> Self {
        Self::new(store, router, dispatcher)
            .with_persona(config.session.persona.clone())
            .with_context_window(config.session.context_window as usize)
            .with_active_backend(config.models.active)
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_context_window(mut self, messages: usize) -> Self {
        self.context_window = messages;
        self
    }

    pub fn with_active_backend(mut self, kind: BackendKind) -> Self {
        self.active = kind;
        self
    }

    pub fn active_backend(&self) -> BackendKind {
        self.active
    }

    /// Route subsequent turns to `kind`. The stored history is untouched.
    pub fn switch_backend(&mut self, kind: BackendKind) {
        if kind != self.active {
            info!(from = %self.active, to = %kind, "switching backend");
        }
        self.active = kind;
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn usage(&self) -> &TokenTracker {
        &self.tracker
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// The last `limit` stored messages, oldest first.
    pub fn history(&self, limit: usize) -> Result<Vec<StoredMessage>, StorageError> {
        self.store.recent_window(limit)
    }

    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.store.clear()
    }

    /// Run one turn for `user_text`.
    ///
    /// Backend failures complete the turn with a degraded reply. Only
    /// storage and configuration failures abort it; a configuration
    /// failure persists nothing.
    pub async fn run_turn(&mut self, user_text: &str) -> Result<TurnOutcome, TurnError> {
        self.transition(TurnState::Assembling);
        let result = self.execute_turn(user_text).await;
        if let Err(e) = &result {
            warn!(error = %e, "turn aborted");
            self.transition(TurnState::Failed);
        }
        self.transition(TurnState::Idle);
        result
    }

    async fn execute_turn(&mut self, user_text: &str) -> Result<TurnOutcome, TurnError> {
        self.repair_dangling_turn()?;
        let window = self.store.recent_window(self.context_window)?;
        let prompt = assemble(&window, &self.persona, user_text);

        let kind = self.active;
        let client = self.router.select(kind)?;
        let tool_capable = self.router.descriptor(kind).tool_capable;

        let user_id = self.store.append(StoredRole::User, user_text)?;

        self.transition(TurnState::Generating);
        let generation = self
            .dispatcher
            .drive(client.as_ref(), &prompt, tool_capable)
            .await;
        let (reply, status) = match generation {
            Ok(generation) => {
                self.tracker.record(kind, &generation.usage);
                self.transition(TurnState::Persisting);
                (
                    generation.content,
                    TurnStatus::Answered {
                        rounds: generation.rounds,
                    },
                )
            }
            Err(e) => {
                warn!(backend = %kind, error = %e, "backend failed, storing error reply");
                self.transition(TurnState::Failed);
                let reply = self.render_backend_error(kind, &e);
                (
                    reply,
                    TurnStatus::Degraded {
                        error: e.to_string(),
                    },
                )
            }
        };

        let assistant_id = self.store.append(StoredRole::Assistant, &reply)?;
        Ok(TurnOutcome {
            user_id,
            assistant_id,
            reply,
            status,
        })
    }

    /// A stored user message with no answer after it means an earlier turn
    /// died mid-flight. Close it off so the log keeps alternating.
    fn repair_dangling_turn(&self) -> Result<(), StorageError> {
        if let Some(last) = self.store.last()? {
            if last.role == StoredRole::User {
                warn!(id = last.id.0, "repairing unanswered user message");
                self.store.append(StoredRole::Assistant, INTERRUPTED_REPLY)?;
            }
        }
        Ok(())
    }

    fn render_backend_error(&self, kind: BackendKind, error: &AiError) -> String {
        format!(
            "Error: {error}. Check that the {} backend is configured correctly.",
            self.router.descriptor(kind).logical_name
        )
    }

    fn transition(&mut self, next: TurnState) {
        debug!(from = %self.state, to = %next, "turn state");
        self.state = next;
    }
}
