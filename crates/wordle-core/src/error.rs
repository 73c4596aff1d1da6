//! Error types for the game core
//!
//! Two layers: [`GuessRejection`] covers live input validation (always
//! recoverable, rendered directly to the player), and [`Error`] covers
//! everything the engine and stores can surface.

use thiserror::Error;

use crate::messages;

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a typed guess was rejected, in the order the checks run
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessRejection {
    /// Guess contains something other than ASCII letters
    #[error("{}", messages::INVALID_CHAR)]
    InvalidCharacters,

    /// Fewer than five letters; the player is still typing
    #[error("{}", messages::CONTINUE_TYPING)]
    TooShort,

    /// More than five letters
    #[error("{}", messages::TOO_LONG)]
    TooLong,

    /// Five letters, but not in the accepted corpus
    #[error("{}", messages::UNKNOWN_WORD)]
    UnknownWord,
}

/// Core error type for the game system
#[derive(Error, Debug)]
pub enum Error {
    /// A guess failed input validation
    #[error(transparent)]
    InvalidGuess(#[from] GuessRejection),

    /// The player has no active session
    #[error("{}", messages::NOT_PLAYING)]
    NotPlaying,

    /// The player already completed today's puzzle
    #[error("{}", messages::ALREADY_PLAYED)]
    AlreadyPlayed {
        /// Unix seconds at which the next puzzle becomes available
        next_puzzle_epoch: i64,
    },

    /// The answer list has no word for the requested puzzle index
    #[error("{}", messages::OUT_OF_WORDS)]
    CatalogExhausted,

    /// A share token could not be decoded; log and ignore
    #[error("malformed share token: {0}")]
    MalformedShareToken(String),

    /// Stats store unavailable or failing; stats are temporarily unavailable
    #[error("stats store error: {0}")]
    StatsStore(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors from store implementations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a stats store error
    pub fn stats_store(msg: impl Into<String>) -> Self {
        Self::StatsStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed-share-token error
    pub fn malformed_share(msg: impl Into<String>) -> Self {
        Self::MalformedShareToken(msg.into())
    }

    /// True for errors that are answered with a direct user-visible message
    /// and never retried or escalated
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidGuess(_)
                | Self::NotPlaying
                | Self::AlreadyPlayed { .. }
                | Self::CatalogExhausted
        )
    }
}
