use std::fmt;

use serde::{Deserialize, Serialize};

/// Default invocation URL for a locally hosted agent runtime.
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8080/invocations";

/// Identity of the agent runtime a submission streams from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEndpoint {
    /// Fixed local inference endpoint.
    Local { url: String },
    /// Managed cloud runtime addressed by an opaque resource id plus region.
    CloudRuntime { runtime_id: String, region: String },
}

impl AgentEndpoint {
    pub fn local_default() -> Self {
        AgentEndpoint::Local {
            url: DEFAULT_LOCAL_URL.to_string(),
        }
    }

    /// The URL the prompt POST goes to.
    ///
    /// Cloud runtimes are reached through the regional data-plane invocation
    /// URL; the runtime id is percent-encoded because resource ids carry
    /// `:` and `/`.
    pub fn invocation_url(&self) -> String {
        match self {
            AgentEndpoint::Local { url } => url.clone(),
            AgentEndpoint::CloudRuntime { runtime_id, region } => format!(
                "https://bedrock-agentcore.{}.amazonaws.com/runtimes/{}/invocations?qualifier=DEFAULT",
                region,
                urlencoding::encode(runtime_id)
            ),
        }
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentEndpoint::Local { url } => write!(f, "local({})", url),
            AgentEndpoint::CloudRuntime { runtime_id, region } => {
                write!(f, "cloud({} @ {})", runtime_id, region)
            }
        }
    }
}
