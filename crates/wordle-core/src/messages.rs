//! User-visible message strings
//!
//! Kept in one place so the interaction layer and the error types render
//! identical wording.

/// Fallback when an interaction arrives in an unexpected shape
pub const UNKNOWN_ERROR: &str = "Unknown Error!";

/// The player submitted a guess without an active session
pub const NOT_PLAYING: &str = "You're not playing the game!";

/// Autocomplete prompt for an empty guess field
pub const TYPE_SOMETHING: &str = "Start typing your Guess!";

/// Guess has fewer than five letters
pub const CONTINUE_TYPING: &str = "Continue typing a 5 letter word...";

/// Guess contains non-letter characters
pub const INVALID_CHAR: &str = "Your guess contains invalid characters!";

/// Guess has more than five letters
pub const TOO_LONG: &str = "Word must be of exactly 5 letters!";

/// Guess is five letters but not in the accepted corpus
pub const UNKNOWN_WORD: &str = "The word seems unknown!";

/// The player already completed today's puzzle
pub const ALREADY_PLAYED: &str = "You've already played today!";

/// The answer list has no entry for today's puzzle index
pub const OUT_OF_WORDS: &str = "I've run out of words!";

/// Stats query for a player with no recorded games
pub const NO_STATS: &str = "You haven't played Wordle! Get started using `/wordle`.";

/// Stats store unavailable
pub const STATS_UNAVAILABLE: &str = "Stats are temporarily unavailable, try again shortly!";
