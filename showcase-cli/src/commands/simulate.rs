//! Simulate command - replay a typing session and stream controller events
//!
//! Each key in `--keys` is one value of the search box, typed `--interval-ms`
//! apart. Events go to stdout as NDJSON, one object per line:
//!   showcase simulate --keys l,la,lap --interval-ms 50 | jq .event

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use showcase_core::{SearchController, SearchEvent};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use super::{load_config, SearchTuning};

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Successive values of the search box, comma-separated
    #[arg(long, value_delimiter = ',', default_value = "l,la,lap,lapt,lapto,laptop")]
    pub keys: Vec<String>,

    /// Time between two keystrokes
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub interval_ms: u64,

    /// Press Enter after the last key (triggers the search again)
    #[arg(long)]
    pub submit: bool,

    /// Run the mount-time search for the empty query first
    #[arg(long)]
    pub mount: bool,

    #[command(flatten)]
    pub tuning: SearchTuning,
}

pub async fn run_simulate(args: SimulateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.tuning)?;
    let source = Arc::new(config.source()?);
    let mut search = SearchController::new(source, config.search_options());
    let mut events = search.events();

    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Ok(line) = serde_json::to_string(&event) {
                        if writeln!(io::stdout(), "{}", line).is_err() {
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    if args.mount {
        search.mount();
    }

    let interval = Duration::from_millis(args.interval_ms);
    for (i, key) in args.keys.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(interval).await;
        }
        search.set_query(key.as_str());
    }
    if args.submit {
        search.submit_now();
    }

    let state = search.settled().await;
    let dispatched = search.dispatched();

    // Closing the channel lets the printer drain and stop
    drop(search);
    printer.await.ok();

    eprintln!(
        "{} keystrokes, {} fetches, {} results{}",
        args.keys.len(),
        dispatched,
        state.results.len(),
        state
            .error
            .as_deref()
            .map(|message| format!(", error: {}", message))
            .unwrap_or_default()
    );

    Ok(())
}

/// Compact one-line rendering, used by the TUI activity log
pub fn describe(event: &SearchEvent) -> String {
    match event {
        SearchEvent::QueryChanged { query, .. } => format!("typed {:?}", query),
        SearchEvent::TimerScheduled {
            query,
            delay_ms,
            superseded,
            ..
        } => {
            if *superseded {
                format!("timer reset for {:?} ({} ms)", query, delay_ms)
            } else {
                format!("timer set for {:?} ({} ms)", query, delay_ms)
            }
        }
        SearchEvent::FetchStarted {
            query, dispatch, ..
        } => format!("#{} fetch {:?}", dispatch, query),
        SearchEvent::FetchCompleted {
            query,
            dispatch,
            results,
            applied,
            ..
        } => {
            if *applied {
                format!("#{} {:?} -> {} products", dispatch, query, results)
            } else {
                format!("#{} {:?} -> stale, dropped", dispatch, query)
            }
        }
        SearchEvent::FetchFailed {
            query,
            dispatch,
            message,
            applied,
            ..
        } => {
            if *applied {
                format!("#{} {:?} failed: {}", dispatch, query, message)
            } else {
                format!("#{} {:?} failed (stale, dropped): {}", dispatch, query, message)
            }
        }
    }
}
