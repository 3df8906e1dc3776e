//! Search command - run one debounced product search and print the results
//!
//! Goes through the same controller as the TUI, so the debounce delay and the
//! simulated latency both apply:
//!   showcase search laptop
//!   showcase search tab --debounce-ms 0 --latency-ms 0 --json
//!   showcase search laptop --fail          # exits non-zero with the error

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use showcase_core::{SearchController, SearchState};
use tracing::info;

use super::{load_config, SearchTuning};
use crate::ui;

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search text (case-insensitive substring; empty lists everything)
    #[arg(default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub tuning: SearchTuning,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_search(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.tuning)?;
    let source = Arc::new(config.source()?);
    let mut search = SearchController::new(source, config.search_options());

    info!(query = %args.query, debounce_ms = config.search.debounce_ms, "searching");
    let pb = ui::spinner(format!("Searching for {:?}...", args.query));

    search.set_query(args.query.as_str());
    let state = search.settled().await;

    if let Some(message) = &state.error {
        ui::finish_error(pb, message.as_str());
        bail!("{}", message);
    }
    ui::finish_success(pb, format!("{} products", state.results.len()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.results)?);
    } else {
        print_results(&state);
    }

    Ok(())
}

fn print_results(state: &SearchState) {
    if state.results.is_empty() {
        println!("No products found");
        return;
    }

    for product in &state.results {
        println!("{:<14} ${}", product.name, product.price);
    }
}
