// # wordled - Wordle game daemon
//
// Thin integration layer over wordle-core: reads configuration from the
// environment, builds the engine and dispatch table, then serves commands
// from stdin until EOF or a shutdown signal. All game logic lives in
// wordle-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Stats Store
// - `WORDLE_STATS_STORE_TYPE`: Type of stats store (memory, file)
// - `WORDLE_STATS_STORE_PATH`: Path to stats file (for file store)
//
// ### Puzzle Clock
// - `WORDLE_ANCHOR_INDEX`: Puzzle index at the anchor instant
// - `WORDLE_ANCHOR_EPOCH_MS`: Anchor instant, Unix milliseconds
//
// ### Engine
// - `WORDLE_MAX_GUESSES`: Guesses per game (1-6)
//
// ### Logging
// - `WORDLE_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Input protocol
//
// One interaction per line:
//
// ```text
// <player> /wordle [hard]     start or resume today's game
// <player> /guess <word>      submit a guess
// <player> /stats             lifetime statistics
// <player> !<custom_id>       press a component button (share)
// ```
//
// ## Example
//
// ```bash
// export WORDLE_STATS_STORE_TYPE=file
// export WORDLE_STATS_STORE_PATH=/var/lib/wordled/stats.json
// export WORDLE_ANCHOR_INDEX=236
// export WORDLE_ANCHOR_EPOCH_MS=1644451200000
//
// wordled
// ```

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use wordle_core::config::{AnchorConfig, EngineConfig, GameConfig, StatsStoreConfig};
use wordle_core::dispatch::{self, CommandRequest, DispatchTable, Reply};
use wordle_core::storage::build_stats_store;
use wordle_core::{GameEngine, PuzzleCatalog};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum WordledExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<WordledExitCode> for ExitCode {
    fn from(code: WordledExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    stats_store_type: String,
    stats_store_path: Option<String>,
    anchor_index: Option<u32>,
    anchor_epoch_ms: Option<i64>,
    max_guesses: Option<u8>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            stats_store_type: env::var("WORDLE_STATS_STORE_TYPE")
                .unwrap_or_else(|_| "memory".to_string()),
            stats_store_path: env::var("WORDLE_STATS_STORE_PATH").ok(),
            anchor_index: parse_env("WORDLE_ANCHOR_INDEX")?,
            anchor_epoch_ms: parse_env("WORDLE_ANCHOR_EPOCH_MS")?,
            max_guesses: parse_env("WORDLE_MAX_GUESSES")?,
            log_level: env::var("WORDLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.stats_store_type.as_str() {
            "memory" | "file" => {}
            other => anyhow::bail!(
                "WORDLE_STATS_STORE_TYPE '{}' is not supported. \
                Supported types: memory, file",
                other
            ),
        }

        if self.stats_store_type == "file" {
            match &self.stats_store_path {
                Some(path) if !path.is_empty() => {}
                _ => anyhow::bail!(
                    "WORDLE_STATS_STORE_PATH is required when WORDLE_STATS_STORE_TYPE=file. \
                    Set it via: export WORDLE_STATS_STORE_PATH=/var/lib/wordled/stats.json"
                ),
            }
        }

        if let Some(epoch_ms) = self.anchor_epoch_ms
            && epoch_ms < 0
        {
            anyhow::bail!(
                "WORDLE_ANCHOR_EPOCH_MS must not be negative. Got: {}",
                epoch_ms
            );
        }

        if let Some(max_guesses) = self.max_guesses
            && !(1..=6).contains(&max_guesses)
        {
            anyhow::bail!(
                "WORDLE_MAX_GUESSES must be between 1 and 6. Got: {}",
                max_guesses
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "WORDLE_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        }

        Ok(())
    }

    /// Assemble the core game configuration
    fn game_config(&self) -> GameConfig {
        let defaults = AnchorConfig::default();
        GameConfig {
            anchor: AnchorConfig {
                index: self.anchor_index.unwrap_or(defaults.index),
                epoch_ms: self.anchor_epoch_ms.unwrap_or(defaults.epoch_ms),
            },
            stats_store: match self.stats_store_type.as_str() {
                "file" => StatsStoreConfig::File {
                    path: self.stats_store_path.clone().unwrap_or_default(),
                },
                _ => StatsStoreConfig::Memory,
            },
            engine: EngineConfig {
                max_guesses: self.max_guesses.unwrap_or_else(|| {
                    EngineConfig::default().max_guesses
                }),
            },
        }
    }
}

/// Parse an optional environment variable, failing loudly on garbage
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} is not a valid value: {}", name, e)),
        Err(_) => Ok(None),
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return WordledExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return WordledExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return WordledExitCode::ConfigError.into();
    }

    info!("Starting wordled daemon");
    info!("Stats store type: {}", config.stats_store_type);

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return WordledExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            WordledExitCode::RuntimeError
        } else {
            WordledExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let game_config = config.game_config();

    let catalog = PuzzleCatalog::embedded();
    info!("Loaded {} daily answers", catalog.answer_count());

    let stats_store = build_stats_store(&game_config.stats_store).await?;
    let engine = Arc::new(GameEngine::new(catalog, stats_store, &game_config)?);
    let table = DispatchTable::build(Arc::clone(&engine));
    info!("Serving commands: {}", table.command_names().join(", "));

    serve(&engine, &table).await?;

    info!("Shutting down daemon");
    engine.flush().await?;

    Ok(())
}

/// Serve interactions from stdin until EOF or a shutdown signal
async fn serve(engine: &Arc<GameEngine>, table: &DispatchTable) -> Result<()> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let Some(reply) = handle_line(engine, table, line.trim()).await {
                            print_reply(&reply);
                        }
                    }
                    None => {
                        info!("stdin closed");
                        return Ok(());
                    }
                }
            }
            signal = wait_for_shutdown() => {
                info!("Received shutdown signal: {}", signal?);
                return Ok(());
            }
        }
    }
}

/// Route one input line: `<player> /<command> [arg]` or `<player> !<custom_id>`
async fn handle_line(
    engine: &Arc<GameEngine>,
    table: &DispatchTable,
    line: &str,
) -> Option<Reply> {
    if line.is_empty() {
        return None;
    }

    let (player, action) = line.split_once(char::is_whitespace)?;
    let action = action.trim();

    if let Some(custom_id) = action.strip_prefix('!') {
        return dispatch::handle_share_component(player, custom_id);
    }

    let command = action.strip_prefix('/')?;
    let (name, option) = match command.split_once(char::is_whitespace) {
        Some((name, option)) => (name, Some(option.trim().to_string())),
        None => (command, None),
    };

    let request = CommandRequest {
        player_id: player.to_string(),
        now: Utc::now(),
        option,
    };

    let reply = table.dispatch(name, request).await;
    if reply.is_none() {
        warn!(player, command = name, "unknown command");
    }
    reply
}

fn print_reply(reply: &Reply) {
    let audience = if reply.ephemeral { "ephemeral" } else { "public" };
    println!("[{}] {}", audience, reply.content);
    if let Some(payload) = &reply.share_payload {
        println!("[button] {}", payload);
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
