//! Conversational memory client.
//!
//! The hosted memory service stores chat turns keyed by actor and session.
//! This crate exposes the two operations the chat flow needs — fetch the
//! last K turns, append one turn — behind a store trait, with an HTTP
//! implementation for the hosted service and an in-memory one for tests
//! and memory-less runs. Store failures never abort a chat turn.

pub mod context;
pub mod remote;
pub mod store;
pub mod types;

use tracing::warn;

pub use context::context_preamble;
pub use remote::RemoteTurnStore;
pub use store::{InMemoryTurnStore, TurnStore};
pub use types::Turn;

/// Fetch the recent-conversation preamble for a session.
///
/// Load failures are logged and swallowed; a chat without memory context is
/// better than no chat.
pub async fn recall_preamble(
    store: &dyn TurnStore,
    actor_id: &str,
    session_id: &str,
    k: usize,
) -> Option<String> {
    match store.last_k_turns(actor_id, session_id, k).await {
        Ok(turns) => context_preamble(&turns),
        Err(e) => {
            warn!(error = %e, "memory load failed");
            None
        }
    }
}

/// Persist one completed user/assistant exchange, best effort.
pub async fn record_exchange(
    store: &dyn TurnStore,
    actor_id: &str,
    session_id: &str,
    prompt: &str,
    reply: &str,
) {
    for turn in [Turn::user(prompt), Turn::assistant(reply)] {
        if let Err(e) = store.append_turn(actor_id, session_id, turn).await {
            warn!(error = %e, "memory save failed");
        }
    }
}
