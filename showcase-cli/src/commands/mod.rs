//! Command implementations for the showcase CLI

pub mod config;
pub mod counter;
pub mod pages;
pub mod search;
pub mod simulate;
pub mod todo;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use showcase_core::search::StaleResults;
use showcase_core::ShowcaseConfig;

// Re-export main dispatcher functions for flat access from main.rs
pub use config::run_config;
pub use counter::run_counter;
pub use pages::run_pages;
pub use search::run_search;
pub use simulate::run_simulate;
pub use todo::run_todo;

/// Search timing flags shared by `search`, `simulate` and `tui`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchTuning {
    /// Quiet period before a search fires (overrides config)
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Simulated backend latency (overrides config)
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Make every fetch fail
    #[arg(long)]
    pub fail: bool,

    /// Drop results of searches that were superseded while in flight
    #[arg(long)]
    pub discard_stale: bool,
}

impl SearchTuning {
    fn apply(&self, config: &mut ShowcaseConfig) {
        if let Some(ms) = self.debounce_ms {
            config.search.debounce_ms = ms;
        }
        if let Some(ms) = self.latency_ms {
            config.search.latency_ms = ms;
        }
        if self.fail {
            config.search.simulate_failure = true;
        }
        if self.discard_stale {
            config.search.stale_results = StaleResults::Discard;
        }
    }
}

/// Resolve the config file: `--config` flag, then `$SHOWCASE_CONFIG`, then the default
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(ShowcaseConfig::config_path)
}

/// Load config and layer command-line tuning on top
pub fn load_config(explicit: Option<&Path>, tuning: &SearchTuning) -> Result<ShowcaseConfig> {
    let path = config_path(explicit);
    let mut config = ShowcaseConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tuning.apply(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_overrides_config() {
        let mut config = ShowcaseConfig::default();
        let tuning = SearchTuning {
            debounce_ms: Some(0),
            latency_ms: Some(10),
            fail: true,
            discard_stale: true,
        };

        tuning.apply(&mut config);

        assert_eq!(config.search.debounce_ms, 0);
        assert_eq!(config.search.latency_ms, 10);
        assert!(config.search.simulate_failure);
        assert_eq!(config.search.stale_results, StaleResults::Discard);
    }

    #[test]
    fn test_empty_tuning_keeps_config() {
        let mut config = ShowcaseConfig::default();
        SearchTuning::default().apply(&mut config);
        assert_eq!(config, ShowcaseConfig::default());
    }
}
