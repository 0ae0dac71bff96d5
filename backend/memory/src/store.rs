use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Turn;

/// Abstract interface for conversational turn storage.
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// The most recent `k` turns for an actor/session pair, oldest first.
    async fn last_k_turns(&self, actor_id: &str, session_id: &str, k: usize) -> Result<Vec<Turn>>;

    /// Append one turn to an actor/session pair.
    async fn append_turn(&self, actor_id: &str, session_id: &str, turn: Turn) -> Result<()>;
}

/// Simple in-memory turn store for tests and runs without a memory service.
pub struct InMemoryTurnStore {
    turns: Arc<RwLock<HashMap<(String, String), Vec<Turn>>>>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self {
            turns: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryTurnStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    async fn last_k_turns(&self, actor_id: &str, session_id: &str, k: usize) -> Result<Vec<Turn>> {
        let turns = self.turns.read().unwrap();
        let stored = match turns.get(&(actor_id.to_string(), session_id.to_string())) {
            Some(stored) => stored,
            None => return Ok(Vec::new()),
        };
        let start = stored.len().saturating_sub(k);
        Ok(stored[start..].to_vec())
    }

    async fn append_turn(&self, actor_id: &str, session_id: &str, turn: Turn) -> Result<()> {
        let mut turns = self.turns.write().unwrap();
        turns
            .entry((actor_id.to_string(), session_id.to_string()))
            .or_default()
            .push(turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_fetch_in_order() {
        let store = InMemoryTurnStore::new();
        store.append_turn("a", "s", Turn::user("first")).await.unwrap();
        store.append_turn("a", "s", Turn::assistant("second")).await.unwrap();

        let turns = store.last_k_turns("a", "s", 10).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "first");
        assert_eq!(turns[1].content, "second");
    }

    #[tokio::test]
    async fn test_last_k_keeps_most_recent() {
        let store = InMemoryTurnStore::new();
        for i in 0..5 {
            store
                .append_turn("a", "s", Turn::user(format!("turn {i}")))
                .await
                .unwrap();
        }

        let turns = store.last_k_turns("a", "s", 2).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "turn 3");
        assert_eq!(turns[1].content, "turn 4");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryTurnStore::new();
        store.append_turn("a", "s1", Turn::user("hello")).await.unwrap();

        assert!(store.last_k_turns("a", "s2", 5).await.unwrap().is_empty());
        assert!(store.last_k_turns("b", "s1", 5).await.unwrap().is_empty());
    }
}
