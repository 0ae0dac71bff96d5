//! Streamed-markdown cleanup for LLM chat responses.
//!
//! Converts raw, chunked model output into progressively displayable
//! markdown: a pure normalization pass, a fragment accumulator carrying
//! the UI refresh cadence, and a plain-text renderer for non-TTY output.

pub mod normalize;
pub mod renderer;
pub mod stream;

pub use normalize::normalize;
pub use renderer::to_plain_text;
pub use stream::{STREAM_CURSOR, StreamAccumulator};
