//! Share tokens
//!
//! A finished game is serialized into a compact comma-delimited token that
//! can ride through a plain-text component field:
//!
//! ```text
//! outcome,puzzleIndex,hardModeFlag,secretWord,guess1,guess2,...
//! ```
//!
//! The token itself carries the secret, so it is never shown directly to the
//! public audience — only the spoiler-free feedback grid derived from it.
//! Decoding a malformed token is an ignorable event for the consumer, never
//! a crash.

use crate::error::{Error, Result};

/// Token field delimiter
const DELIMITER: char = ',';

/// Minimum fields in a valid token: outcome, index, hard flag, secret
const MIN_FIELDS: usize = 4;

/// How a recorded game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The secret was guessed
    Won,
    /// All guesses were used without a match
    Lost,
}

impl ShareOutcome {
    /// Wire code: `1` = won, `2` = lost by exhaustion
    pub fn code(self) -> u8 {
        match self {
            ShareOutcome::Won => 1,
            ShareOutcome::Lost => 2,
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(ShareOutcome::Won),
            "2" => Some(ShareOutcome::Lost),
            _ => None,
        }
    }
}

/// The public-shareable outcome of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareToken {
    pub outcome: ShareOutcome,
    pub puzzle_index: u32,
    pub hard_mode: bool,
    pub secret: String,
    pub guesses: Vec<String>,
}

impl ShareToken {
    /// Serialize to the delimited wire form
    pub fn encode(&self) -> String {
        let mut fields = vec![
            self.outcome.code().to_string(),
            self.puzzle_index.to_string(),
            self.hard_mode.to_string(),
            self.secret.clone(),
        ];
        fields.extend(self.guesses.iter().cloned());
        fields.join(&DELIMITER.to_string())
    }

    /// Parse a wire token
    ///
    /// Returns [`Error::MalformedShareToken`] when the token has fewer than
    /// four fields or any fixed field fails to parse.
    pub fn decode(token: &str) -> Result<Self> {
        let fields: Vec<&str> = token.split(DELIMITER).collect();
        if fields.len() < MIN_FIELDS {
            return Err(Error::malformed_share(format!(
                "expected at least {} fields, got {}",
                MIN_FIELDS,
                fields.len()
            )));
        }

        let outcome = ShareOutcome::from_code(fields[0])
            .ok_or_else(|| Error::malformed_share(format!("unknown outcome code {:?}", fields[0])))?;
        let puzzle_index: u32 = fields[1]
            .parse()
            .map_err(|_| Error::malformed_share(format!("bad puzzle index {:?}", fields[1])))?;
        let hard_mode: bool = fields[2]
            .parse()
            .map_err(|_| Error::malformed_share(format!("bad hard mode flag {:?}", fields[2])))?;

        Ok(Self {
            outcome,
            puzzle_index,
            hard_mode,
            secret: fields[3].to_string(),
            guesses: fields[4..].iter().map(|s| s.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShareToken {
        ShareToken {
            outcome: ShareOutcome::Won,
            puzzle_index: 236,
            hard_mode: true,
            secret: "crane".into(),
            guesses: vec!["slate".into(), "crate".into(), "crane".into()],
        }
    }

    #[test]
    fn encode_is_comma_delimited() {
        assert_eq!(sample().encode(), "1,236,true,crane,slate,crate,crane");
    }

    #[test]
    fn round_trip_identity() {
        let token = sample();
        assert_eq!(ShareToken::decode(&token.encode()).unwrap(), token);

        let lost = ShareToken {
            outcome: ShareOutcome::Lost,
            hard_mode: false,
            ..sample()
        };
        assert_eq!(ShareToken::decode(&lost.encode()).unwrap(), lost);
    }

    #[test]
    fn fewer_than_four_fields_is_malformed() {
        for token in ["", "1", "1,236", "1,236,true"] {
            assert!(matches!(
                ShareToken::decode(token),
                Err(Error::MalformedShareToken(_))
            ));
        }
    }

    #[test]
    fn bad_fixed_fields_are_malformed() {
        for token in ["9,236,true,crane", "1,abc,true,crane", "1,236,maybe,crane"] {
            assert!(matches!(
                ShareToken::decode(token),
                Err(Error::MalformedShareToken(_))
            ));
        }
    }

    #[test]
    fn guesses_are_optional_fields() {
        let token = ShareToken::decode("2,10,false,crane").unwrap();
        assert_eq!(token.outcome, ShareOutcome::Lost);
        assert!(token.guesses.is_empty());
    }
}
