//! Stats repository
//!
//! Persisted per-player play history: streaks, win counts, and the
//! guess-count histogram. The repository owns the derivation rules; the
//! [`StatsStore`] it wraps only moves typed records in and out of storage.
//!
//! Streak semantics: a loss resets the current streak to 1, not 0. The
//! just-played loss restarts a streak of length one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::feedback::LetterFeedback;
use crate::traits::StatsStore;

/// Highest guess count a game can end on
pub const MAX_GUESSES: u8 = 6;

/// The last completed game, kept for replay protection and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlayed {
    /// Puzzle index of the completed game
    pub puzzle_index: u32,
    /// Guesses used (1..=6)
    pub guess_count: u8,
    /// Whether the game was won
    pub won: bool,
}

/// Lifetime statistics for one player
///
/// Invariants maintained by [`StatsRepository::record`]:
/// `won <= played`, `current_streak <= max_streak`, and the histogram values
/// sum to at most `won` (only wins are bucketed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Opaque player identifier
    pub player_id: String,
    /// Consecutive completed days counting the latest result
    pub current_streak: u32,
    /// Best streak ever recorded
    pub max_streak: u32,
    /// Total completed games
    pub played: u32,
    /// Total won games
    pub won: u32,
    /// Wins bucketed by guess count (1..=6)
    pub guess_histogram: BTreeMap<u8, u32>,
    /// The most recent completion
    pub last_played: LastPlayed,
}

impl PlayerStats {
    /// Win percentage over all completed games
    pub fn win_percent(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.played) * 100.0
        }
    }
}

/// Derives and persists per-player statistics over an injected store
pub struct StatsRepository {
    store: Box<dyn StatsStore>,
}

impl StatsRepository {
    /// Wrap a storage backend
    pub fn new(store: Box<dyn StatsStore>) -> Self {
        Self { store }
    }

    /// Fetch a player's stats, `None` if they never completed a game
    pub async fn get(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        self.store.get(player_id).await
    }

    /// Record a completed game and return the updated stats
    ///
    /// Callers must hold the player's session lock: the read-modify-write
    /// here is only atomic per player because at most one completion per
    /// player is in flight at a time.
    pub async fn record(
        &self,
        player_id: &str,
        puzzle_index: u32,
        guess_count: u8,
        won: bool,
    ) -> Result<PlayerStats> {
        let last_played = LastPlayed {
            puzzle_index,
            guess_count,
            won,
        };

        let stats = match self.store.get(player_id).await? {
            None => {
                let current_streak = u32::from(won);
                let mut guess_histogram = BTreeMap::new();
                guess_histogram.insert(guess_count, u32::from(won));
                PlayerStats {
                    player_id: player_id.to_string(),
                    current_streak,
                    max_streak: current_streak,
                    played: 1,
                    won: u32::from(won),
                    guess_histogram,
                    last_played,
                }
            }
            Some(mut stats) => {
                stats.played += 1;
                stats.won += u32::from(won);
                // A loss restarts the streak at length one, not zero.
                stats.current_streak = if won { stats.current_streak + 1 } else { 1 };
                stats.max_streak = stats.max_streak.max(stats.current_streak);
                if won {
                    *stats.guess_histogram.entry(guess_count).or_insert(0) += 1;
                }
                stats.last_played = last_played;
                stats
            }
        };

        self.store.put(player_id, &stats).await?;
        debug!(
            player_id,
            puzzle_index,
            guess_count,
            won,
            current_streak = stats.current_streak,
            "recorded completed game"
        );
        Ok(stats)
    }

    /// Whether the player has already completed the puzzle for `today_index`
    ///
    /// Monotonic: once true for an index it stays true for that index and
    /// every smaller one, since `last_played.puzzle_index` never decreases.
    pub async fn has_played_today(&self, player_id: &str, today_index: u32) -> Result<bool> {
        Ok(self
            .store
            .get(player_id)
            .await?
            .is_some_and(|stats| stats.last_played.puzzle_index >= today_index))
    }

    /// Persist any buffered writes in the backend
    pub async fn flush(&self) -> Result<()> {
        self.store.flush().await
    }
}

/// Render the guess distribution as proportional bars
///
/// One line per guess count 1..=6, scaled against the largest bucket, with
/// the raw count appended. The bucket of the player's last completed game is
/// drawn with the "correct" glyph, the rest with the "absent" glyph.
pub fn histogram_report(stats: &PlayerStats) -> String {
    let buckets: Vec<u32> = (1..=MAX_GUESSES)
        .map(|count| stats.guess_histogram.get(&count).copied().unwrap_or(0))
        .collect();
    let max = buckets.iter().copied().max().unwrap_or(0);

    buckets
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let count = i as u8 + 1;
            let glyph = if count == stats.last_played.guess_count {
                LetterFeedback::Correct.glyph()
            } else {
                LetterFeedback::Absent.glyph()
            };
            let width = if max == 0 {
                0
            } else {
                (value as usize * 10) / max as usize
            };
            format!("`{}` {} {}", count, glyph.repeat(width), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStatsStore;

    fn repo() -> StatsRepository {
        StatsRepository::new(Box::new(MemoryStatsStore::new()))
    }

    #[tokio::test]
    async fn first_win_creates_full_record() {
        let repo = repo();
        let stats = repo.record("alice", 40, 3, true).await.unwrap();

        assert_eq!(stats.played, 1);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.guess_histogram.get(&3), Some(&1));
        assert_eq!(
            stats.last_played,
            LastPlayed {
                puzzle_index: 40,
                guess_count: 3,
                won: true
            }
        );
    }

    #[tokio::test]
    async fn first_loss_creates_zero_streak() {
        let repo = repo();
        let stats = repo.record("alice", 40, 6, false).await.unwrap();

        assert_eq!(stats.played, 1);
        assert_eq!(stats.won, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 0);
        // Created bucket carries no win.
        assert_eq!(stats.guess_histogram.values().sum::<u32>(), 0);
    }

    #[tokio::test]
    async fn wins_extend_the_streak() {
        let repo = repo();
        for day in 0..4 {
            repo.record("alice", day, 4, true).await.unwrap();
        }
        let stats = repo.get("alice").await.unwrap().unwrap();
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.max_streak, 4);
        assert_eq!(stats.guess_histogram.get(&4), Some(&4));
    }

    #[tokio::test]
    async fn loss_resets_streak_to_one_not_zero() {
        let repo = repo();
        for day in 0..5 {
            repo.record("alice", day, 2, true).await.unwrap();
        }
        let stats = repo.record("alice", 5, 6, false).await.unwrap();

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 5);
        assert_eq!(stats.played, 6);
        assert_eq!(stats.won, 5);
        // No win bucketed for the loss.
        assert_eq!(stats.guess_histogram.values().sum::<u32>(), 5);
    }

    #[tokio::test]
    async fn invariants_hold_across_mixed_history() {
        let repo = repo();
        let outcomes = [true, false, true, true, false, true];
        let mut last = None;
        for (day, &won) in outcomes.iter().enumerate() {
            last = Some(repo.record("bob", day as u32, 5, won).await.unwrap());
        }
        let stats = last.unwrap();
        assert!(stats.won <= stats.played);
        assert!(stats.current_streak <= stats.max_streak);
        assert!(stats.guess_histogram.values().sum::<u32>() <= stats.won);
    }

    #[tokio::test]
    async fn has_played_today_is_monotonic() {
        let repo = repo();
        assert!(!repo.has_played_today("alice", 40).await.unwrap());

        repo.record("alice", 40, 3, true).await.unwrap();
        assert!(repo.has_played_today("alice", 40).await.unwrap());
        assert!(repo.has_played_today("alice", 39).await.unwrap());
        assert!(!repo.has_played_today("alice", 41).await.unwrap());

        repo.record("alice", 41, 2, false).await.unwrap();
        assert!(repo.has_played_today("alice", 41).await.unwrap());
    }

    #[test]
    fn histogram_report_scales_and_highlights() {
        let mut guess_histogram = BTreeMap::new();
        guess_histogram.insert(3, 4);
        guess_histogram.insert(5, 2);
        let stats = PlayerStats {
            player_id: "alice".into(),
            current_streak: 2,
            max_streak: 4,
            played: 6,
            won: 6,
            guess_histogram,
            last_played: LastPlayed {
                puzzle_index: 50,
                guess_count: 5,
                won: true,
            },
        };

        let report = histogram_report(&stats);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 6);
        // Largest bucket gets the full bar.
        assert_eq!(lines[2], format!("`3` {} 4", "⬛".repeat(10)));
        // Last game's bucket is highlighted and scaled: 2/4 of 10 = 5.
        assert_eq!(lines[4], format!("`5` {} 2", "🟩".repeat(5)));
        // Empty buckets render a bare count.
        assert_eq!(lines[0], "`1`  0");
    }

    #[test]
    fn histogram_report_with_no_wins_has_no_bars() {
        let stats = PlayerStats {
            player_id: "bob".into(),
            current_streak: 0,
            max_streak: 0,
            played: 1,
            won: 0,
            guess_histogram: BTreeMap::new(),
            last_played: LastPlayed {
                puzzle_index: 1,
                guess_count: 6,
                won: false,
            },
        };
        let report = histogram_report(&stats);
        assert!(!report.contains("🟩🟩"));
        assert_eq!(report.lines().count(), 6);
    }

    #[test]
    fn win_percent_handles_zero_played() {
        let stats = PlayerStats {
            player_id: "x".into(),
            current_streak: 0,
            max_streak: 0,
            played: 0,
            won: 0,
            guess_histogram: BTreeMap::new(),
            last_played: LastPlayed {
                puzzle_index: 0,
                guess_count: 0,
                won: false,
            },
        };
        assert_eq!(stats.win_percent(), 0.0);
    }
}
