//! Puzzle clock
//!
//! Derives the current puzzle index from wall-clock time against a fixed
//! anchor pair (anchor index, anchor timestamp). Pure functions of the
//! supplied `now`; the clock itself holds no mutable state and has no
//! failure modes.

use chrono::{DateTime, Utc};

/// Milliseconds in one puzzle day
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Default anchor: puzzle 236 was active on 2022-02-10 00:00:00 UTC
pub const DEFAULT_ANCHOR_INDEX: u32 = 236;

/// Default anchor timestamp in Unix milliseconds
pub const DEFAULT_ANCHOR_EPOCH_MS: i64 = 1_644_451_200_000;

/// Maps wall-clock time to puzzle indices
///
/// The index increases by exactly one per calendar day from the anchor.
/// Clocks set before the anchor clamp to index 0 rather than going negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleClock {
    anchor_index: u32,
    anchor_epoch_ms: i64,
}

impl PuzzleClock {
    /// Create a clock with a custom anchor pair
    pub fn new(anchor_index: u32, anchor_epoch_ms: i64) -> Self {
        Self {
            anchor_index,
            anchor_epoch_ms,
        }
    }

    /// The puzzle index active at `now`
    pub fn current_index(&self, now: DateTime<Utc>) -> u32 {
        let elapsed_ms = now.timestamp_millis() - self.anchor_epoch_ms;
        let days = elapsed_ms.div_euclid(DAY_MS);
        (i64::from(self.anchor_index) + days).max(0) as u32
    }

    /// Unix seconds at which the puzzle after `now`'s becomes available
    ///
    /// Used for human-readable "next puzzle" countdowns.
    pub fn next_puzzle_epoch_secs(&self, now: DateTime<Utc>) -> i64 {
        let next = i64::from(self.current_index(now)) + 1;
        let offset_days = next - i64::from(self.anchor_index);
        (self.anchor_epoch_ms + offset_days * DAY_MS) / 1000
    }
}

impl Default for PuzzleClock {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_INDEX, DEFAULT_ANCHOR_EPOCH_MS)
    }
}
