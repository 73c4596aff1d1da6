//! Stats store trait
//!
//! The physical storage engine is a collaborator, not part of the core: the
//! core only needs fetch-by-id and upsert-by-id over the typed
//! [`PlayerStats`](crate::stats::PlayerStats) record. Anything exposing that
//! shape (a file, a key-value store, a relational table) can back the game.
//!
//! Implementations must be safe to call concurrently from multiple tasks.
//! They do not need to serialize read-modify-write cycles per player — the
//! session store's per-player lock already guarantees that at most one
//! completion is being recorded for a given player at a time.

use async_trait::async_trait;

use crate::error::Result;
use crate::stats::PlayerStats;

/// Persistence interface for per-player statistics
///
/// Failures surface as [`Error::StatsStore`](crate::Error::StatsStore) and are
/// treated by the core as "stats temporarily unavailable"; they must never
/// leave a session half-recorded.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Fetch the stats record for a player, `None` if they never finished a game
    async fn get(&self, player_id: &str) -> Result<Option<PlayerStats>>;

    /// Insert or replace the stats record for a player
    async fn put(&self, player_id: &str, stats: &PlayerStats) -> Result<()>;

    /// Persist any buffered writes
    async fn flush(&self) -> Result<()>;
}
