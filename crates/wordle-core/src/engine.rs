//! Core game engine
//!
//! Orchestrates the flow of one interaction end to end:
//!
//! ```text
//! PuzzleClock ──▶ PuzzleCatalog ──▶ SessionStore ──▶ feedback
//!                                        │
//!                                (on termination)
//!                                        ▼
//!                              StatsRepository + ShareToken
//! ```
//!
//! Every operation acquires the player's session slot before touching shared
//! state and holds it until the operation completes, so a player's
//! interactions are processed strictly one at a time even when the host
//! dispatches them concurrently. On termination the stats write happens
//! before the session leaves the store; if the write fails, the session
//! (minus the unrecorded guess) stays in place as the retry path.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::catalog::PuzzleCatalog;
use crate::clock::PuzzleClock;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::feedback::{LetterFeedback, WORD_LENGTH, classify};
use crate::session::{RenderTarget, Session, SessionStore};
use crate::share::{ShareOutcome, ShareToken};
use crate::stats::{PlayerStats, StatsRepository};
use crate::traits::StatsStore;

/// Lifecycle state of a session as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Guesses remain and the secret is unguessed
    Active,
    /// The last guess matched the secret
    Won,
    /// All guesses were used without a match
    Lost,
}

impl GameStatus {
    /// Whether the session has terminated
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// One classified guess row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRow {
    /// The lower-cased guessed word
    pub word: String,
    /// Per-letter classification against the secret
    pub labels: [LetterFeedback; WORD_LENGTH],
}

/// Caller-facing snapshot of a session
///
/// Carries everything the interaction layer needs to render the game without
/// reaching into the store (or learning the secret).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub puzzle_index: u32,
    pub hard_mode: bool,
    pub max_guesses: u8,
    pub rows: Vec<GuessRow>,
    pub status: GameStatus,
}

/// Result of a start request
#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub view: GameView,
    /// True when an existing session was surfaced instead of created
    pub resumed: bool,
}

/// Result of an accepted guess
#[derive(Debug, Clone)]
pub struct GuessOutcome {
    pub view: GameView,
    pub status: GameStatus,
    /// Present on termination: the public-share payload
    pub share: Option<ShareToken>,
    /// Present on termination: the freshly updated stats
    pub stats: Option<PlayerStats>,
}

/// The game-session engine
pub struct GameEngine {
    clock: PuzzleClock,
    catalog: PuzzleCatalog,
    sessions: SessionStore,
    stats: StatsRepository,
    max_guesses: u8,
}

impl GameEngine {
    /// Create an engine over a catalog and a stats backend
    pub fn new(
        catalog: PuzzleCatalog,
        stats_store: Box<dyn StatsStore>,
        config: &GameConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            clock: PuzzleClock::new(config.anchor.index, config.anchor.epoch_ms),
            catalog,
            sessions: SessionStore::new(),
            stats: StatsRepository::new(stats_store),
            max_guesses: config.engine.max_guesses,
        })
    }

    /// The engine's puzzle clock
    pub fn clock(&self) -> &PuzzleClock {
        &self.clock
    }

    /// The engine's word corpus
    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    /// Start (or resume) the player's game for the puzzle active at `now`
    ///
    /// Fails with [`Error::AlreadyPlayed`] once today's puzzle is recorded as
    /// completed and with [`Error::CatalogExhausted`] when the answer list
    /// has no word for today. Calling twice on the same day surfaces the
    /// same session instead of creating a duplicate, which is how a player
    /// recovers after their original message expires.
    pub async fn start(
        &self,
        player_id: &str,
        now: DateTime<Utc>,
        hard_mode: bool,
    ) -> Result<StartOutcome> {
        let today = self.clock.current_index(now);
        let mut slot = self.sessions.lock_player(player_id).await;

        if self.stats.has_played_today(player_id, today).await? {
            return Err(Error::AlreadyPlayed {
                next_puzzle_epoch: self.clock.next_puzzle_epoch_secs(now),
            });
        }

        if self.catalog.word_for(today).is_none() {
            warn!(today, "puzzle catalog exhausted");
            return Err(Error::CatalogExhausted);
        }

        if let Some(session) = slot.as_mut() {
            // The session may belong to an earlier, unfinished day; it is
            // resumed unchanged either way. The stale render target is
            // dropped so the interaction layer attaches a fresh one.
            session.set_render_target(None);
            debug!(player_id, puzzle_index = session.puzzle_index(), "resumed session");
            let view = self.view_of(session, GameStatus::Active)?;
            return Ok(StartOutcome {
                view,
                resumed: true,
            });
        }

        let session = Session::new(player_id, today, hard_mode);
        let view = self.view_of(&session, GameStatus::Active)?;
        *slot = Some(session);
        info!(player_id, puzzle_index = today, hard_mode, "started session");

        Ok(StartOutcome {
            view,
            resumed: false,
        })
    }

    /// Apply a guess to the player's live session
    ///
    /// Validation happens before the slot is consulted, so a malformed guess
    /// never mutates anything. On termination the stats record and the
    /// session removal form a single logical transaction: a failed stats
    /// write rolls the guess back and keeps the session alive for a retry.
    pub async fn guess(&self, player_id: &str, candidate: &str) -> Result<GuessOutcome> {
        let word = self.catalog.validate_guess(candidate)?;

        let mut slot = self.sessions.lock_player(player_id).await;
        let session = slot.as_mut().ok_or(Error::NotPlaying)?;

        let secret = self
            .catalog
            .word_for(session.puzzle_index())
            .ok_or(Error::CatalogExhausted)?
            .to_string();

        session.guesses.push(word.clone());

        let status = if word == secret {
            GameStatus::Won
        } else if session.guess_count() >= self.max_guesses {
            GameStatus::Lost
        } else {
            GameStatus::Active
        };

        if !status.is_terminal() {
            debug!(player_id, guesses = session.guess_count(), "guess accepted");
            let view = self.view_of(session, status)?;
            return Ok(GuessOutcome {
                view,
                status,
                share: None,
                stats: None,
            });
        }

        let won = status == GameStatus::Won;
        let guess_count = session.guess_count();
        let puzzle_index = session.puzzle_index();

        let stats = match self
            .stats
            .record(player_id, puzzle_index, guess_count, won)
            .await
        {
            Ok(stats) => stats,
            Err(e) => {
                // Keep the session replayable: the unrecorded guess comes
                // back off so resubmitting it retries the whole completion.
                session.guesses.pop();
                warn!(player_id, error = %e, "stats write failed, session retained");
                return Err(e);
            }
        };

        let share = ShareToken {
            outcome: if won {
                ShareOutcome::Won
            } else {
                ShareOutcome::Lost
            },
            puzzle_index,
            hard_mode: session.hard_mode(),
            secret,
            guesses: session.guesses().to_vec(),
        };
        let view = self.view_of(session, status)?;

        *slot = None;
        info!(player_id, puzzle_index, guess_count, won, "session terminated");

        Ok(GuessOutcome {
            view,
            status,
            share: Some(share),
            stats: Some(stats),
        })
    }

    /// Whether the player currently has a live session
    pub async fn has_session(&self, player_id: &str) -> bool {
        self.sessions.is_playing(player_id).await
    }

    /// Record a fresh render target on the player's live session
    pub async fn set_render_target(&self, player_id: &str, target: RenderTarget) -> Result<()> {
        let mut slot = self.sessions.lock_player(player_id).await;
        let session = slot.as_mut().ok_or(Error::NotPlaying)?;
        session.set_render_target(Some(target));
        Ok(())
    }

    /// Lifetime stats for a player, `None` if they never completed a game
    pub async fn player_stats(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        self.stats.get(player_id).await
    }

    /// Persist any buffered stats writes
    pub async fn flush(&self) -> Result<()> {
        self.stats.flush().await
    }

    fn view_of(&self, session: &Session, status: GameStatus) -> Result<GameView> {
        let secret = self
            .catalog
            .word_for(session.puzzle_index())
            .ok_or(Error::CatalogExhausted)?;

        let rows = session
            .guesses()
            .iter()
            .map(|word| GuessRow {
                word: word.clone(),
                labels: classify(secret, word),
            })
            .collect();

        Ok(GameView {
            puzzle_index: session.puzzle_index(),
            hard_mode: session.hard_mode(),
            max_guesses: self.max_guesses,
            rows,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStatsStore;
    use chrono::TimeZone;

    fn engine() -> GameEngine {
        let catalog = PuzzleCatalog::from_lists(
            ["crane", "slate", "house"],
            ["crate", "least", "geese", "mouse"],
        );
        let config = GameConfig {
            anchor: crate::config::AnchorConfig {
                index: 0,
                epoch_ms: 0,
            },
            ..Default::default()
        };
        GameEngine::new(catalog, Box::new(MemoryStatsStore::new()), &config).unwrap()
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n * 86_400 + 3600, 0).unwrap()
    }

    #[tokio::test]
    async fn start_creates_then_resumes() {
        let engine = engine();

        let first = engine.start("alice", day(0), true).await.unwrap();
        assert!(!first.resumed);
        assert_eq!(first.view.puzzle_index, 0);
        assert!(first.view.hard_mode);
        assert!(first.view.rows.is_empty());

        let second = engine.start("alice", day(0), false).await.unwrap();
        assert!(second.resumed);
        // The resumed session keeps its original hard-mode flag.
        assert!(second.view.hard_mode);
    }

    #[tokio::test]
    async fn win_terminates_and_records() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();

        let miss = engine.guess("alice", "slate").await.unwrap();
        assert_eq!(miss.status, GameStatus::Active);
        assert!(miss.share.is_none());

        let hit = engine.guess("alice", "crane").await.unwrap();
        assert_eq!(hit.status, GameStatus::Won);
        assert_eq!(hit.view.rows.len(), 2);
        assert_eq!(hit.share.as_ref().unwrap().guesses.len(), 2);

        let stats = hit.stats.unwrap();
        assert_eq!(stats.played, 1);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.guess_histogram.get(&2), Some(&1));

        assert!(!engine.has_session("alice").await);
        assert!(matches!(
            engine.guess("alice", "crane").await,
            Err(Error::NotPlaying)
        ));
    }

    #[tokio::test]
    async fn sixth_miss_loses() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();

        for _ in 0..5 {
            let outcome = engine.guess("alice", "slate").await.unwrap();
            assert_eq!(outcome.status, GameStatus::Active);
        }
        let last = engine.guess("alice", "slate").await.unwrap();
        assert_eq!(last.status, GameStatus::Lost);
        assert_eq!(last.share.as_ref().unwrap().outcome, ShareOutcome::Lost);

        let stats = last.stats.unwrap();
        assert_eq!(stats.won, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.guess_histogram.values().sum::<u32>(), 0);
    }

    #[tokio::test]
    async fn completed_day_blocks_restart_until_next_day() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();
        engine.guess("alice", "crane").await.unwrap();

        let blocked = engine.start("alice", day(0), false).await;
        assert!(matches!(blocked, Err(Error::AlreadyPlayed { .. })));
        if let Err(Error::AlreadyPlayed { next_puzzle_epoch }) = blocked {
            assert_eq!(next_puzzle_epoch, 86_400);
        }

        // Next day is a new puzzle.
        let next = engine.start("alice", day(1), false).await.unwrap();
        assert_eq!(next.view.puzzle_index, 1);
    }

    #[tokio::test]
    async fn exhausted_catalog_is_reported() {
        let engine = engine();
        // Catalog has three answers; day 3 has none.
        assert!(matches!(
            engine.start("alice", day(3), false).await,
            Err(Error::CatalogExhausted)
        ));
    }

    #[tokio::test]
    async fn invalid_guess_leaves_session_untouched() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();

        assert!(matches!(
            engine.guess("alice", "ab").await,
            Err(Error::InvalidGuess(_))
        ));
        assert!(matches!(
            engine.guess("alice", "zzzzz").await,
            Err(Error::InvalidGuess(_))
        ));

        let resumed = engine.start("alice", day(0), false).await.unwrap();
        assert!(resumed.view.rows.is_empty());
    }

    #[tokio::test]
    async fn unfinished_session_survives_into_the_next_day() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();
        engine.guess("alice", "slate").await.unwrap();

        // Never finished day 0; the same session resumes on day 1.
        let resumed = engine.start("alice", day(1), false).await.unwrap();
        assert!(resumed.resumed);
        assert_eq!(resumed.view.puzzle_index, 0);
        assert_eq!(resumed.view.rows.len(), 1);
    }

    #[tokio::test]
    async fn players_do_not_interfere() {
        let engine = engine();
        engine.start("alice", day(0), false).await.unwrap();
        engine.start("bob", day(0), false).await.unwrap();

        engine.guess("alice", "crane").await.unwrap();
        assert!(!engine.has_session("alice").await);
        assert!(engine.has_session("bob").await);
    }

    #[tokio::test]
    async fn guess_without_session_is_not_playing() {
        let engine = engine();
        assert!(matches!(
            engine.guess("alice", "crane").await,
            Err(Error::NotPlaying)
        ));
    }
}
