//! Stats store implementations
//!
//! - [`MemoryStatsStore`]: per-process, lost on restart; tests and throwaway
//!   deployments.
//! - [`FileStatsStore`]: one JSON file with atomic writes and corruption
//!   recovery.

pub mod file;
pub mod memory;

pub use file::FileStatsStore;
pub use memory::MemoryStatsStore;

use crate::config::StatsStoreConfig;
use crate::error::Result;
use crate::traits::StatsStore;

/// Construct a stats store from configuration
pub async fn build_stats_store(config: &StatsStoreConfig) -> Result<Box<dyn StatsStore>> {
    match config {
        StatsStoreConfig::Memory => Ok(Box::new(MemoryStatsStore::new())),
        StatsStoreConfig::File { path } => Ok(Box::new(FileStatsStore::open(path).await?)),
    }
}
