//! Sessions and the session store
//!
//! The store is the single source of truth for "is this player currently
//! playing": it maps player ids to at most one live [`Session`] and hands out
//! per-player locks so two near-simultaneous interactions from the same
//! player can never interleave a read-modify-write on the guess sequence.
//! Interactions from different players never contend.
//!
//! Every engine gets a fresh store; there is no process-wide singleton.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Opaque handle to the last message rendered for a session
///
/// The interaction layer owns what this means (a message id, an interaction
/// token); the core only stores and replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget(pub String);

/// One player's in-progress attempt at a puzzle
///
/// Owned exclusively by the [`SessionStore`]; mutated only while the player's
/// slot lock is held, and removed from the store when the game terminates.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) player_id: String,
    pub(crate) puzzle_index: u32,
    pub(crate) hard_mode: bool,
    pub(crate) guesses: Vec<String>,
    pub(crate) render_target: Option<RenderTarget>,
}

impl Session {
    pub(crate) fn new(player_id: &str, puzzle_index: u32, hard_mode: bool) -> Self {
        Self {
            player_id: player_id.to_string(),
            puzzle_index,
            hard_mode,
            guesses: Vec::new(),
            render_target: None,
        }
    }

    /// The player this session belongs to
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// The puzzle this session is playing
    pub fn puzzle_index(&self) -> u32 {
        self.puzzle_index
    }

    /// Whether the session was started in hard mode (cosmetic marker)
    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// Accepted guesses so far, oldest first
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Number of accepted guesses
    pub fn guess_count(&self) -> u8 {
        self.guesses.len() as u8
    }

    /// Replace the render target, e.g. when the previous message expired
    pub fn set_render_target(&mut self, target: Option<RenderTarget>) {
        self.render_target = target;
    }

    /// The current render target, if any
    pub fn render_target(&self) -> Option<&RenderTarget> {
        self.render_target.as_ref()
    }
}

/// Exclusive handle to one player's session slot
///
/// `None` means the player is not currently playing. Holding the guard for
/// the whole of an operation (including the stats write on termination) is
/// what serializes access per player.
pub type SessionSlot = OwnedMutexGuard<Option<Session>>;

/// Registry of at most one live session per player
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: RwLock<HashMap<String, Arc<Mutex<Option<Session>>>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a player's slot, creating an empty one on first contact
    ///
    /// Blocks until any other interaction for the same player finishes.
    pub async fn lock_player(&self, player_id: &str) -> SessionSlot {
        let cell = {
            let slots = self.slots.read().await;
            slots.get(player_id).cloned()
        };

        let cell = match cell {
            Some(cell) => cell,
            None => {
                let mut slots = self.slots.write().await;
                slots
                    .entry(player_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(None)))
                    .clone()
            }
        };

        cell.lock_owned().await
    }

    /// Whether the player currently has a live session
    pub async fn is_playing(&self, player_id: &str) -> bool {
        self.lock_player(player_id).await.is_some()
    }

    /// Number of live sessions across all players
    pub async fn active_count(&self) -> usize {
        let slots = self.slots.read().await;
        let mut count = 0;
        for cell in slots.values() {
            if cell.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }
}
