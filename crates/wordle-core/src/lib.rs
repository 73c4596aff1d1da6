//! # wordle-core
//!
//! Core library for a daily word-guessing game played through chat
//! interactions: one puzzle per calendar day, one session per player per
//! day, six guesses, lifetime streak statistics, and spoiler-free public
//! shares.
//!
//! ## Architecture Overview
//!
//! - **PuzzleClock**: pure mapping from wall-clock time to puzzle indices
//! - **PuzzleCatalog**: read-only word corpus; daily answers + valid guesses
//! - **feedback**: per-letter guess classification and glyph rendering
//! - **GameEngine / SessionStore**: one live session per player, guarded by
//!   per-player locks; sessions terminate into the stats repository
//! - **StatsRepository / StatsStore**: streaks and guess histograms over an
//!   injectable persistence backend (memory or file)
//! - **ShareToken**: compact public-share encoding of a finished game
//! - **DispatchTable**: explicit command → handler map consumed by the
//!   (external) interaction layer
//!
//! The chat-platform connection, command registration, and message/button
//! rendering for a concrete platform are collaborators, not part of this
//! crate; everything here is platform-agnostic.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod messages;
pub mod session;
pub mod share;
pub mod stats;
pub mod storage;
pub mod traits;
pub mod view;

// Re-export core types for convenience
pub use catalog::PuzzleCatalog;
pub use clock::PuzzleClock;
pub use config::{GameConfig, StatsStoreConfig};
pub use dispatch::{CommandRequest, DispatchTable, Reply};
pub use engine::{GameEngine, GameStatus, GuessOutcome, StartOutcome};
pub use error::{Error, GuessRejection, Result};
pub use feedback::LetterFeedback;
pub use session::SessionStore;
pub use share::{ShareOutcome, ShareToken};
pub use stats::{PlayerStats, StatsRepository};
pub use storage::{FileStatsStore, MemoryStatsStore};
pub use traits::StatsStore;
