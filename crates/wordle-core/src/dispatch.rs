//! Command dispatch table
//!
//! The interaction layer is an external collaborator; this module is the
//! contract it consumes. Handlers are plain async functions closed over an
//! `Arc<GameEngine>`, collected into an explicit name → handler map built
//! once at startup — routing is data, not annotations.
//!
//! Three commands map 1:1 onto the engine: `wordle` (start, optional hard
//! mode), `guess` (submit a word), `stats`. Two auxiliary entry points cover
//! the rest of the surface: live guess autocompletion and the share button
//! component.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::engine::GameEngine;
use crate::error::Error;
use crate::messages;
use crate::share::ShareToken;
use crate::view;

/// Component custom-id prefix for the share button
pub const SHARE_PREFIX: &str = "share:";

/// One incoming command interaction, already stripped of platform detail
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// Opaque player identifier
    pub player_id: String,
    /// Wall-clock time of the interaction
    pub now: DateTime<Utc>,
    /// The command's single string option, if supplied
    pub option: Option<String>,
}

/// What the interaction layer should show in response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body
    pub content: String,
    /// Whether only the invoking player should see it
    pub ephemeral: bool,
    /// Component payload to attach (the share button custom id)
    pub share_payload: Option<String>,
}

impl Reply {
    /// A player-only reply
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            share_payload: None,
        }
    }

    /// A reply everyone in the channel sees
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
            share_payload: None,
        }
    }
}

/// One autocomplete choice shown while the player types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteChoice {
    /// Text shown to the player
    pub name: String,
    /// Value submitted if the choice is picked
    pub value: String,
}

type HandlerFuture = Pin<Box<dyn Future<Output = Reply> + Send + 'static>>;

/// A registered command handler
pub type CommandHandler = Box<dyn Fn(CommandRequest) -> HandlerFuture + Send + Sync>;

/// Name → handler map handed to the interaction layer at startup
pub struct DispatchTable {
    handlers: HashMap<&'static str, CommandHandler>,
}

impl DispatchTable {
    /// Build the table over an engine
    pub fn build(engine: Arc<GameEngine>) -> Self {
        let mut handlers: HashMap<&'static str, CommandHandler> = HashMap::new();

        let start_engine = Arc::clone(&engine);
        handlers.insert(
            "wordle",
            Box::new(move |req| {
                let engine = Arc::clone(&start_engine);
                Box::pin(async move { handle_start(&engine, req).await })
            }),
        );

        let guess_engine = Arc::clone(&engine);
        handlers.insert(
            "guess",
            Box::new(move |req| {
                let engine = Arc::clone(&guess_engine);
                Box::pin(async move { handle_guess(&engine, req).await })
            }),
        );

        handlers.insert(
            "stats",
            Box::new(move |req| {
                let engine = Arc::clone(&engine);
                Box::pin(async move { handle_stats(&engine, req).await })
            }),
        );

        Self { handlers }
    }

    /// Route a command by name; `None` for names this table does not own
    pub async fn dispatch(&self, command: &str, request: CommandRequest) -> Option<Reply> {
        let handler = self.handlers.get(command)?;
        Some(handler(request).await)
    }

    /// The command names this table serves
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

async fn handle_start(engine: &GameEngine, req: CommandRequest) -> Reply {
    let hard_mode = req
        .option
        .as_deref()
        .is_some_and(|o| matches!(o, "hard" | "true"));

    match engine.start(&req.player_id, req.now, hard_mode).await {
        Ok(outcome) => Reply::ephemeral(view::game_message(&outcome.view)),
        Err(e) => reply_for_error(&e),
    }
}

async fn handle_guess(engine: &GameEngine, req: CommandRequest) -> Reply {
    let Some(word) = req.option else {
        return Reply::ephemeral(messages::UNKNOWN_ERROR);
    };

    match engine.guess(&req.player_id, &word).await {
        Ok(outcome) => {
            let mut reply = Reply::ephemeral(view::game_message(&outcome.view));
            if let Some(token) = &outcome.share {
                reply.share_payload = Some(format!("{}{}", SHARE_PREFIX, token.encode()));
            }
            reply
        }
        Err(e) => reply_for_error(&e),
    }
}

async fn handle_stats(engine: &GameEngine, req: CommandRequest) -> Reply {
    match engine.player_stats(&req.player_id).await {
        Ok(None) => Reply::ephemeral(messages::NO_STATS),
        Ok(Some(stats)) => {
            let today = engine.clock().current_index(req.now);
            let next = engine.clock().next_puzzle_epoch_secs(req.now);
            Reply::ephemeral(view::stats_message(&stats, today, next))
        }
        Err(e) => reply_for_error(&e),
    }
}

/// Live validation feedback for the guess option as the player types
pub async fn autocomplete_guess(
    engine: &GameEngine,
    player_id: &str,
    partial: &str,
) -> AutocompleteChoice {
    let prompt = |name: &str| AutocompleteChoice {
        name: name.to_string(),
        value: partial.to_string(),
    };

    if !engine.has_session(player_id).await {
        return prompt(messages::NOT_PLAYING);
    }
    if partial.is_empty() {
        return prompt(messages::TYPE_SOMETHING);
    }

    match engine.catalog().validate_guess(partial) {
        Ok(word) => AutocompleteChoice {
            name: format!("Submit \"{}\"?", word),
            value: word,
        },
        Err(rejection) => prompt(&rejection.to_string()),
    }
}

/// Handle a component interaction carrying a share payload
///
/// Returns the public share reply, or `None` for payloads this module does
/// not own or cannot decode — a malformed token is logged and ignored, never
/// surfaced to the player who clicked.
pub fn handle_share_component(player_id: &str, custom_id: &str) -> Option<Reply> {
    let encoded = custom_id.strip_prefix(SHARE_PREFIX)?;

    match ShareToken::decode(encoded) {
        Ok(token) => Some(Reply::public(view::share_message(&token, player_id))),
        Err(e) => {
            warn!(player_id, error = %e, "ignoring malformed share payload");
            None
        }
    }
}

fn reply_for_error(error: &Error) -> Reply {
    match error {
        Error::AlreadyPlayed { next_puzzle_epoch } => Reply::ephemeral(format!(
            "{} Next Wordle: {}",
            messages::ALREADY_PLAYED,
            view::next_puzzle_mention(*next_puzzle_epoch)
        )),
        e if e.is_user_error() => Reply::ephemeral(e.to_string()),
        Error::StatsStore(_) => {
            warn!(error = %error, "stats store failure surfaced to player");
            Reply::ephemeral(messages::STATS_UNAVAILABLE)
        }
        _ => {
            warn!(error = %error, "unexpected error surfaced to player");
            Reply::ephemeral(messages::UNKNOWN_ERROR)
        }
    }
}
