//! Guess feedback
//!
//! Classifies each letter of a guess against the secret word and renders the
//! classification as a glyph row. Repeated letters use the simplified rule:
//! a letter is `Present` whenever the secret contains it anywhere, without
//! capping by the letter's remaining count after exact matches. A guess with
//! a repeated letter can therefore show more `Present` marks than the secret
//! has copies of that letter.

use serde::{Deserialize, Serialize};

/// Number of letters in every secret and guess
pub const WORD_LENGTH: usize = 5;

/// Per-letter classification of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterFeedback {
    /// Right letter, right position
    Correct,
    /// Letter occurs elsewhere in the secret
    Present,
    /// Letter does not occur in the secret
    Absent,
}

impl LetterFeedback {
    /// Spoiler-free glyph for this classification
    pub fn glyph(self) -> &'static str {
        match self {
            LetterFeedback::Correct => "🟩",
            LetterFeedback::Present => "🟨",
            LetterFeedback::Absent => "⬛",
        }
    }
}

/// Classify `guess` against `secret`, position by position
///
/// Both inputs must be lower-cased words of [`WORD_LENGTH`] ASCII letters;
/// the catalog's validation guarantees this for every stored guess.
pub fn classify(secret: &str, guess: &str) -> [LetterFeedback; WORD_LENGTH] {
    debug_assert_eq!(secret.len(), WORD_LENGTH);
    debug_assert_eq!(guess.len(), WORD_LENGTH);

    let secret_bytes = secret.as_bytes();
    let mut labels = [LetterFeedback::Absent; WORD_LENGTH];

    for (i, &letter) in guess.as_bytes().iter().enumerate().take(WORD_LENGTH) {
        labels[i] = if secret_bytes[i] == letter {
            LetterFeedback::Correct
        } else if secret_bytes.contains(&letter) {
            LetterFeedback::Present
        } else {
            LetterFeedback::Absent
        };
    }

    labels
}

/// Render one guess row
///
/// Full mode appends the upper-cased word after the glyphs; spoiler-free mode
/// shows the glyphs alone, which is what public shares use.
pub fn render_row(word: &str, labels: &[LetterFeedback; WORD_LENGTH], spoiler_free: bool) -> String {
    let glyphs: String = labels.iter().map(|l| l.glyph()).collect();
    if spoiler_free {
        glyphs
    } else {
        format!("{} {}", glyphs, word.to_uppercase())
    }
}

/// Render the board for a sequence of guesses, one row per guess
pub fn render_board(secret: &str, guesses: &[String], spoiler_free: bool) -> String {
    guesses
        .iter()
        .map(|guess| render_row(guess, &classify(secret, guess), spoiler_free))
        .collect::<Vec<_>>()
        .join("\n")
}
