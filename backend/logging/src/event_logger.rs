//! Chat Event Logger
//!
//! Structured chat events (prompt, tool annotation, completion, error)
//! written through `tracing` to the rolling NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::scrub::scrub_secrets;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    PromptSubmitted {
        chars: usize,
    },
    ToolAnnotation {
        tool_name: String,
    },
    ResponseCompleted {
        fragments: usize,
        chars: usize,
    },
    AgentError {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ChatEventEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ChatEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log one chat event, scrubbing credentials from free-text fields.
    pub fn log_event(session_id: &str, mut event: ChatEvent) {
        if let ChatEvent::AgentError { error_msg } = &mut event {
            *error_msg = scrub_secrets(error_msg);
        }

        let entry = ChatEventEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        };

        info!(target: "chat_events", event = ?entry, "chat event");
    }
}
