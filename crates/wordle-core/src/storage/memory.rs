//! In-memory stats store
//!
//! Stats live in a `HashMap` behind an `RwLock` and are lost on restart.
//! First choice for tests and acceptable for deployments where lifetime
//! stats are not worth persisting.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::stats::PlayerStats;
use crate::traits::StatsStore;

/// Non-persistent stats store
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    inner: Arc<RwLock<HashMap<String, PlayerStats>>>,
}

impl MemoryStatsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players with a recorded game
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no player has a recorded game
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        Ok(self.inner.read().await.get(player_id).cloned())
    }

    async fn put(&self, player_id: &str, stats: &PlayerStats) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(player_id.to_string(), stats.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        // Nothing buffered.
        Ok(())
    }
}
