//! File-backed stats store
//!
//! Persists all player records in one JSON document with a version field.
//! Writes go to a temporary file first and are renamed into place, so a
//! crash mid-write never leaves a truncated store. Each successful write
//! also refreshes a `.backup` copy of the previous good state; a corrupted
//! main file falls back to the backup on load, and an unreadable backup
//! starts the store empty rather than refusing to boot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::stats::PlayerStats;
use crate::traits::StatsStore;

/// On-disk format version, bumped on incompatible layout changes
const STATS_FILE_VERSION: &str = "1";

/// Serializable stats file layout
#[derive(Debug, Serialize, Deserialize)]
struct StatsFileFormat {
    version: String,
    players: HashMap<String, PlayerStats>,
}

/// Stats store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStatsStore {
    path: PathBuf,
    players: Arc<RwLock<HashMap<String, PlayerStats>>>,
}

impl FileStatsStore {
    /// Open or create a stats file
    ///
    /// Creates missing parent directories, then loads existing records,
    /// recovering from the backup copy if the main file is corrupted.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::config(format!(
                        "failed to create stats directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let players = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            players: Arc::new(RwLock::new(players)),
        })
    }

    async fn load_with_recovery(path: &Path) -> Result<HashMap<String, PlayerStats>> {
        match Self::load(path).await {
            Ok(players) => {
                debug!(
                    path = %path.display(),
                    players = players.len(),
                    "loaded stats file"
                );
                Ok(players)
            }
            Err(Error::Json(parse_err)) => {
                warn!(
                    path = %path.display(),
                    error = %parse_err,
                    "stats file corrupted, trying backup"
                );
                let backup = Self::backup_path(path);
                match Self::load(&backup).await {
                    Ok(players) => {
                        info!(players = players.len(), "recovered stats from backup");
                        Ok(players)
                    }
                    Err(backup_err) => {
                        warn!(
                            error = %backup_err,
                            "backup unusable, starting with empty stats"
                        );
                        Ok(HashMap::new())
                    }
                }
            }
            Err(other) => Err(other),
        }
    }

    async fn load(path: &Path) -> Result<HashMap<String, PlayerStats>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::stats_store(format!("failed to read {}: {}", path.display(), e))
        })?;
        let file: StatsFileFormat = serde_json::from_str(&content)?;

        if file.version != STATS_FILE_VERSION {
            warn!(
                expected = STATS_FILE_VERSION,
                found = file.version,
                "stats file version mismatch, loading anyway"
            );
        }

        Ok(file.players)
    }

    /// Write the whole store atomically: temp file, backup, rename
    async fn write(&self) -> Result<()> {
        let snapshot = {
            let guard = self.players.read().await;
            StatsFileFormat {
                version: STATS_FILE_VERSION.to_string(),
                players: guard.clone(),
            }
        };

        let json = serde_json::to_string_pretty(&snapshot)?;

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp).await.map_err(|e| {
                Error::stats_store(format!("failed to create {}: {}", temp.display(), e))
            })?;
            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::stats_store(format!("failed to write {}: {}", temp.display(), e))
            })?;
            file.flush().await.map_err(|e| {
                Error::stats_store(format!("failed to flush {}: {}", temp.display(), e))
            })?;
        }

        if self.path.exists() {
            let backup = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup).await {
                warn!(error = %e, "failed to refresh stats backup");
            }
        }

        fs::rename(&temp, &self.path).await.map_err(|e| {
            Error::stats_store(format!(
                "failed to rename {} to {}: {}",
                temp.display(),
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl StatsStore for FileStatsStore {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        Ok(self.players.read().await.get(player_id).cloned())
    }

    async fn put(&self, player_id: &str, stats: &PlayerStats) -> Result<()> {
        {
            let mut guard = self.players.write().await;
            guard.insert(player_id.to_string(), stats.clone());
        }
        // Stats are written on every completion; write through immediately
        // so a crash never loses a recorded game.
        self.write().await
    }

    async fn flush(&self) -> Result<()> {
        self.write().await
    }
}
