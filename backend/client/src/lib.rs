//! Streaming client for the hosted agent runtime.
//!
//! One HTTP POST per user submission; the response body is consumed as a
//! server-sent-event style line stream and payload fragments are forwarded
//! over an mpsc channel as they arrive. All transport failure is delivered
//! as a terminal error fragment rather than an error return.

pub mod invoke;
mod sse;

pub use invoke::AgentClient;
