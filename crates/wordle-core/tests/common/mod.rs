//! Test doubles and common utilities for the contract tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use wordle_core::catalog::PuzzleCatalog;
use wordle_core::config::{AnchorConfig, GameConfig};
use wordle_core::error::Result;
use wordle_core::stats::PlayerStats;
use wordle_core::storage::MemoryStatsStore;
use wordle_core::traits::StatsStore;
use wordle_core::{Error, GameEngine};

/// Answers for days 0..4, plus enough accepted words to miss with
pub fn test_catalog() -> PuzzleCatalog {
    PuzzleCatalog::from_lists(
        ["crane", "slate", "house", "mouse", "wrist"],
        ["crate", "least", "geese", "wheat", "worse", "water"],
    )
}

/// Engine anchored at index 0 / epoch 0 over the given store
pub fn test_engine(store: Box<dyn StatsStore>) -> GameEngine {
    let config = GameConfig {
        anchor: AnchorConfig {
            index: 0,
            epoch_ms: 0,
        },
        ..Default::default()
    };
    GameEngine::new(test_catalog(), store, &config).expect("engine construction succeeds")
}

/// Engine over a fresh in-memory store
pub fn memory_engine() -> GameEngine {
    test_engine(Box::new(MemoryStatsStore::new()))
}

/// An hour into day `n` of the test clock
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(n * 86_400 + 3_600, 0).unwrap()
}

/// A stats store that fails the next `n` writes, then behaves normally
///
/// Reads always succeed, matching an outage window on the write path only.
pub struct FlakyStatsStore {
    inner: MemoryStatsStore,
    failures_remaining: Arc<AtomicUsize>,
    put_call_count: Arc<AtomicUsize>,
}

impl FlakyStatsStore {
    pub fn failing(times: usize) -> Self {
        Self {
            inner: MemoryStatsStore::new(),
            failures_remaining: Arc::new(AtomicUsize::new(times)),
            put_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Share the state and counters with an existing store
    pub fn sharing_with(other: &Self) -> Self {
        Self {
            inner: other.inner.clone(),
            failures_remaining: Arc::clone(&other.failures_remaining),
            put_call_count: Arc::clone(&other.put_call_count),
        }
    }

    pub fn put_call_count(&self) -> usize {
        self.put_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StatsStore for FlakyStatsStore {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        self.inner.get(player_id).await
    }

    async fn put(&self, player_id: &str, stats: &PlayerStats) -> Result<()> {
        self.put_call_count.fetch_add(1, Ordering::SeqCst);

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(Error::stats_store("injected write failure"));
        }

        self.inner.put(player_id, stats).await
    }

    async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }
}
