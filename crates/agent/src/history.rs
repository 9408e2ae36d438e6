//! In-memory conversation history
//!
//! Turns are kept per user id and truncated to the most recent window.
//! Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use setter_core::{HistoryStore, Result, Turn};
use std::collections::{HashMap, VecDeque};

pub struct InMemoryHistoryStore {
    window: usize,
    turns: RwLock<HashMap<String, VecDeque<Turn>>>,
}

impl InMemoryHistoryStore {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            turns: RwLock::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(setter_config::constants::agent::HISTORY_WINDOW)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn recent(&self, user_id: &str) -> Result<Vec<Turn>> {
        Ok(self
            .turns
            .read()
            .get(user_id)
            .map(|turns| turns.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn append(&self, user_id: &str, turn: Turn) -> Result<()> {
        let mut turns = self.turns.write();
        let history = turns.entry(user_id.to_string()).or_default();
        history.push_back(turn);
        while history.len() > self.window {
            history.pop_front();
        }
        Ok(())
    }

    async fn clear(&self, user_id: &str) -> Result<()> {
        if self.turns.write().remove(user_id).is_some() {
            tracing::debug!(user_id = %user_id, "History cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_window_truncation() {
        let store = InMemoryHistoryStore::new(3);
        for i in 0..5 {
            store.append("u1", Turn::user(format!("msg {}", i))).await.unwrap();
        }

        let recent = store.recent("u1").await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "msg 2");
        assert_eq!(recent[2].content, "msg 4");
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryHistoryStore::default();
        store.append("a", Turn::user("hi")).await.unwrap();
        store.append("b", Turn::assistant("hello")).await.unwrap();

        assert_eq!(store.recent("a").await.unwrap().len(), 1);

        store.clear("a").await.unwrap();
        assert!(store.recent("a").await.unwrap().is_empty());
        assert_eq!(store.recent("b").await.unwrap().len(), 1);
    }

    #[test]
    fn test_zero_window_keeps_one() {
        assert_eq!(InMemoryHistoryStore::new(0).window(), 1);
    }
}
