//! Agent runtime invocation.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use skycast_core::AgentEndpoint;

use crate::sse::forward_stream;

/// Session header for the managed cloud runtime.
const RUNTIME_SESSION_HEADER: &str = "X-Amzn-Bedrock-AgentCore-Runtime-Session-Id";

/// Channel capacity between the network task and the consumer.
const FRAGMENT_BUFFER: usize = 64;

#[derive(Serialize)]
struct InvocationRequest<'a> {
    prompt: &'a str,
}

/// Client for one agent runtime endpoint.
pub struct AgentClient {
    http: reqwest::Client,
    endpoint: AgentEndpoint,
    bearer_token: Option<String>,
}

impl AgentClient {
    pub fn new(endpoint: AgentEndpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            bearer_token: None,
        }
    }

    /// Bearer token sent on cloud runtime requests.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// Invoke the agent with one prompt and stream back payload fragments.
    ///
    /// A single attempt: no retries, no backoff, no timeout at this layer.
    /// Every failure mode — connect error, non-2xx status, body read error —
    /// arrives on the channel as one terminal `Error invoking agent: …`
    /// fragment, so the caller always drains to a renderable end state.
    pub fn invoke_streaming(
        &self,
        prompt: &str,
        session_id: Uuid,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(FRAGMENT_BUFFER);
        let request = self.build_request(prompt, session_id);
        let endpoint = self.endpoint.clone();

        tokio::spawn(async move {
            info!(%endpoint, "invoking agent");

            let response = match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "agent invocation failed");
                    let _ = tx.send(format!("Error invoking agent: {e}")).await;
                    return;
                }
            };

            forward_stream(Box::pin(response.bytes_stream()), tx, cancel).await;
        });

        rx
    }

    fn build_request(&self, prompt: &str, session_id: Uuid) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .post(self.endpoint.invocation_url())
            .json(&InvocationRequest { prompt });

        if matches!(self.endpoint, AgentEndpoint::CloudRuntime { .. }) {
            request = request.header(RUNTIME_SESSION_HEADER, session_id.to_string());
            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }
        }

        request
    }
}
