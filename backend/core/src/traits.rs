use anyhow::Result;
use async_trait::async_trait;

/// A capability the agent runtime can call on the user's behalf.
///
/// Registration and dispatch happen inside the runtime; this trait is the
/// seam local tool implementations hang on.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "get_current_weather").
    fn name(&self) -> &str;

    /// Description for the LLM prompt.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String>;
}
