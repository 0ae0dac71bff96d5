//! HTTP client for the hosted memory service.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use skycast_core::SkycastError;

use crate::store::TurnStore;
use crate::types::Turn;

#[derive(Debug, Deserialize)]
struct TurnsResponse {
    turns: Vec<Turn>,
}

/// Turn store backed by the hosted memory service's REST API.
pub struct RemoteTurnStore {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteTurnStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn turns_url(&self, actor_id: &str, session_id: &str) -> String {
        format!(
            "{}/actors/{}/sessions/{}/turns",
            self.base_url,
            urlencoding::encode(actor_id),
            urlencoding::encode(session_id)
        )
    }
}

#[async_trait]
impl TurnStore for RemoteTurnStore {
    async fn last_k_turns(&self, actor_id: &str, session_id: &str, k: usize) -> Result<Vec<Turn>> {
        let url = self.turns_url(actor_id, session_id);
        debug!(%url, k, "fetching recent turns");

        let response: TurnsResponse = self
            .http
            .get(&url)
            .query(&[("limit", k.to_string())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SkycastError::Memory(format!("turn fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| SkycastError::Memory(format!("malformed turn list: {e}")))?;

        Ok(response.turns)
    }

    async fn append_turn(&self, actor_id: &str, session_id: &str, turn: Turn) -> Result<()> {
        let url = self.turns_url(actor_id, session_id);
        debug!(%url, role = %turn.role, "appending turn");

        self.http
            .post(&url)
            .json(&turn)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SkycastError::Memory(format!("turn append failed: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_url_encodes_ids() {
        let store = RemoteTurnStore::new("http://localhost:7070/");
        let url = store.turns_url("user/1", "sess 2");
        assert_eq!(
            url,
            "http://localhost:7070/actors/user%2F1/sessions/sess%202/turns"
        );
    }

    #[test]
    fn test_turns_response_deserialization() {
        let raw = r#"{"turns": [{"role": "user", "content": "hi", "created_at": "2026-08-01T12:00:00Z"}]}"#;
        let parsed: TurnsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.turns.len(), 1);
        assert_eq!(parsed.turns[0].content, "hi");
    }
}
