use thiserror::Error;

/// Top-level error type for the SkyCast runtime.
///
/// Agent transport failure is deliberately absent: the stream consumer
/// reports it as a terminal error fragment, never as an error return.
#[derive(Debug, Error)]
pub enum SkycastError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("memory service error: {0}")]
    Memory(String),

    #[error("tool execution failed: {0}")]
    Tool(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
