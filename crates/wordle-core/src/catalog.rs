//! Puzzle catalog
//!
//! Read-only reference data: the ordered daily answer list and the secondary
//! list of valid-but-never-daily guesses. The daily list is indexed directly
//! by puzzle index, so the catalog is exhausted once the clock walks past the
//! end of the list — an expected operating condition, surfaced to players as
//! a distinct message rather than an error.

use std::collections::HashSet;

use tracing::warn;

use crate::error::GuessRejection;
use crate::feedback::WORD_LENGTH;

/// Embedded daily answers, one per line, ordered by puzzle index
const EMBEDDED_ANSWERS: &str = include_str!("../data/answers.txt");

/// Embedded secondary guess list (accepted but never an answer)
const EMBEDDED_ACCEPTED: &str = include_str!("../data/accepted.txt");

/// The word corpus for one deployment
///
/// Guess acceptance is independent of which puzzle is active: any word in
/// either list is a valid guess on any day.
#[derive(Debug, Clone)]
pub struct PuzzleCatalog {
    answers: Vec<String>,
    accepted: HashSet<String>,
}

impl PuzzleCatalog {
    /// Build a catalog from explicit lists
    ///
    /// Entries that are not exactly five ASCII letters are dropped with a
    /// warning; the remaining answers keep their list positions relative to
    /// each other.
    pub fn from_lists<A, B>(answers: A, accepted: B) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let answers: Vec<String> = answers
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();

        let mut accepted: HashSet<String> = accepted
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();

        // Membership checks look at one set; fold the answers in.
        accepted.extend(answers.iter().cloned());

        Self { answers, accepted }
    }

    /// Build the catalog from the word lists compiled into the crate
    pub fn embedded() -> Self {
        Self::from_lists(EMBEDDED_ANSWERS.lines(), EMBEDDED_ACCEPTED.lines())
    }

    /// The secret word for a puzzle index, or `None` once the list runs out
    pub fn word_for(&self, index: u32) -> Option<&str> {
        self.answers.get(index as usize).map(String::as_str)
    }

    /// Number of daily answers; indices at or past this are exhausted
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether a lower-cased five-letter word is an acceptable guess
    pub fn is_accepted(&self, word: &str) -> bool {
        self.accepted.contains(word)
    }

    /// Validate a typed guess
    ///
    /// Returns the lower-cased word on success. The ladder is: non-letter
    /// characters, too short (still typing), too long, unknown word.
    pub fn validate_guess(&self, candidate: &str) -> Result<String, GuessRejection> {
        if !candidate.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GuessRejection::InvalidCharacters);
        }

        let len = candidate.len();
        if len < WORD_LENGTH {
            return Err(GuessRejection::TooShort);
        }
        if len > WORD_LENGTH {
            return Err(GuessRejection::TooLong);
        }

        let word = candidate.to_ascii_lowercase();
        if !self.is_accepted(&word) {
            return Err(GuessRejection::UnknownWord);
        }

        Ok(word)
    }
}

/// Lower-case a list entry, dropping anything that is not a five-letter word
fn normalize(raw: &str) -> Option<String> {
    let word = raw.trim();
    if word.is_empty() {
        return None;
    }
    if word.len() != WORD_LENGTH || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        warn!(entry = word, "dropping malformed word list entry");
        return None;
    }
    Some(word.to_ascii_lowercase())
}
