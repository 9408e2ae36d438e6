//! Conversation history persistence

use async_trait::async_trait;

use crate::conversation::Turn;
use crate::Result;

/// Append-only per-user history, truncated to a recent window
#[async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Most recent turns, oldest first
    async fn recent(&self, user_id: &str) -> Result<Vec<Turn>>;

    async fn append(&self, user_id: &str, turn: Turn) -> Result<()>;

    async fn clear(&self, user_id: &str) -> Result<()>;
}
