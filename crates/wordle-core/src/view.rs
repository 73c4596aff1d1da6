//! Message rendering
//!
//! Pure text assembly for the three surfaces the interaction layer shows:
//! the private game board, the private stats summary, and the public share.
//! Countdowns use the `<t:{epoch}:R>` relative-timestamp markup understood
//! by the chat platform.

use crate::engine::{GameStatus, GameView};
use crate::feedback::{classify, render_row};
use crate::share::{ShareOutcome, ShareToken};
use crate::stats::{PlayerStats, histogram_report};

/// Header plus board for a player's own (non-spoiler-free) game message
///
/// Header shapes: `Wordle 236* 2?/6` while active, `Wordle 236 3/6` on a
/// win, `Wordle 236 X/6` on a loss. The asterisk marks hard mode.
pub fn game_message(view: &GameView) -> String {
    let hard_marker = if view.hard_mode { "*" } else { "" };
    let progress = match view.status {
        GameStatus::Active => format!(
            "{}?/{}\nPlay using `/guess`!",
            view.rows.len(),
            view.max_guesses
        ),
        GameStatus::Won => format!("{}/{}", view.rows.len(), view.max_guesses),
        GameStatus::Lost => format!("X/{}", view.max_guesses),
    };

    let board = view
        .rows
        .iter()
        .map(|row| render_row(&row.word, &row.labels, false))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Wordle {}{} {}\n\n{}",
        view.puzzle_index, hard_marker, progress, board
    )
    .trim()
    .to_string()
}

/// Relative-timestamp markup for the next puzzle
pub fn next_puzzle_mention(epoch_secs: i64) -> String {
    format!("<t:{}:R>", epoch_secs)
}

/// The private stats summary
///
/// `today_index` and `next_puzzle_epoch` drive the availability footer: the
/// player either can play right now or sees a countdown.
pub fn stats_message(stats: &PlayerStats, today_index: u32, next_puzzle_epoch: i64) -> String {
    let next = if today_index > stats.last_played.puzzle_index {
        "Available now!".to_string()
    } else {
        next_puzzle_mention(next_puzzle_epoch)
    };

    format!(
        "**Played**: {}\n**Win %**: {:.1}\n**Current Streak**: {}\n**Max Streak**: {}\n\n\
         **Guess distributions**\n{}\n\n**Next Wordle**: {}",
        stats.played,
        stats.win_percent(),
        stats.current_streak,
        stats.max_streak,
        histogram_report(stats),
        next
    )
}

/// The public, spoiler-free share message
///
/// Renders only the classification grid; neither the secret nor the guessed
/// words appear.
pub fn share_message(token: &ShareToken, player_id: &str) -> String {
    let score = match token.outcome {
        ShareOutcome::Won => format!("{}/6", token.guesses.len()),
        ShareOutcome::Lost => "X/6".to_string(),
    };
    let hard_marker = if token.hard_mode { "*" } else { "" };

    let grid = token
        .guesses
        .iter()
        .map(|guess| render_row(guess, &classify(&token.secret, guess), true))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<@{}>'s Wordle {} {}{}\n\n{}",
        player_id, token.puzzle_index, score, hard_marker, grid
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GuessRow;
    use crate::feedback::classify;
    use crate::stats::LastPlayed;
    use std::collections::BTreeMap;

    fn view(status: GameStatus, hard_mode: bool, guesses: &[&str]) -> GameView {
        GameView {
            puzzle_index: 236,
            hard_mode,
            max_guesses: 6,
            rows: guesses
                .iter()
                .map(|word| GuessRow {
                    word: (*word).to_string(),
                    labels: classify("crane", word),
                })
                .collect(),
            status,
        }
    }

    #[test]
    fn active_game_header_and_prompt() {
        let message = game_message(&view(GameStatus::Active, true, &["slate"]));
        assert!(message.starts_with("Wordle 236* 1?/6"));
        assert!(message.contains("Play using `/guess`!"));
        assert!(message.contains("SLATE"));
    }

    #[test]
    fn won_game_header() {
        let message = game_message(&view(GameStatus::Won, false, &["slate", "crane"]));
        assert!(message.starts_with("Wordle 236 2/6"));
        assert!(!message.contains('?'));
    }

    #[test]
    fn lost_game_header() {
        let message = game_message(&view(GameStatus::Lost, false, &["slate"; 6]));
        assert!(message.starts_with("Wordle 236 X/6"));
    }

    #[test]
    fn fresh_game_has_no_board() {
        let message = game_message(&view(GameStatus::Active, false, &[]));
        assert_eq!(message, "Wordle 236 0?/6\nPlay using `/guess`!");
    }

    #[test]
    fn share_message_is_spoiler_free() {
        let token = ShareToken {
            outcome: ShareOutcome::Won,
            puzzle_index: 236,
            hard_mode: true,
            secret: "crane".into(),
            guesses: vec!["slate".into(), "crane".into()],
        };
        let message = share_message(&token, "12345");

        assert!(message.starts_with("<@12345>'s Wordle 236 2/6*"));
        assert!(!message.to_lowercase().contains("crane"));
        assert!(!message.to_lowercase().contains("slate"));
        assert!(message.contains("🟩🟩🟩🟩🟩"));
    }

    #[test]
    fn lost_share_scores_x() {
        let token = ShareToken {
            outcome: ShareOutcome::Lost,
            puzzle_index: 10,
            hard_mode: false,
            secret: "crane".into(),
            guesses: vec!["slate".into(); 6],
        };
        assert!(share_message(&token, "1").contains("Wordle 10 X/6"));
    }

    #[test]
    fn stats_footer_flips_on_availability() {
        let stats = PlayerStats {
            player_id: "alice".into(),
            current_streak: 1,
            max_streak: 1,
            played: 1,
            won: 1,
            guess_histogram: BTreeMap::from([(3, 1)]),
            last_played: LastPlayed {
                puzzle_index: 40,
                guess_count: 3,
                won: true,
            },
        };

        let played_today = stats_message(&stats, 40, 1_000);
        assert!(played_today.contains("<t:1000:R>"));

        let new_day = stats_message(&stats, 41, 1_000);
        assert!(new_day.contains("Available now!"));
        assert!(new_day.contains("**Win %**: 100.0"));
    }
}
