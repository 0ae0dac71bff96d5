//! Structured logging for SkyCast.
//!
//! Handles tracing initialization (console + rolling NDJSON file), secret
//! scrubbing, and chat event logging.

pub mod event_logger;
pub mod logger;
pub mod scrub;

pub use event_logger::{ChatEvent, ChatEventEntry, EventLogger};
pub use logger::{init_file_logger, init_logger};
pub use scrub::scrub_secrets;
