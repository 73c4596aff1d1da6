//! Abstract interfaces the game core is built against
//!
//! - [`StatsStore`]: persistence for per-player lifetime statistics

pub mod stats_store;

pub use stats_store::StatsStore;
