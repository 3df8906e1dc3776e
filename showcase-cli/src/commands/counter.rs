//! Counter command - apply a sequence of operations and print the count
//!
//!   showcase counter inc inc dec     # Count: 1
//!   showcase counter dec             # Count: -1 (red on a terminal)

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use showcase_core::{Counter, Tone};

#[derive(Parser, Debug)]
pub struct CounterArgs {
    /// Operations to apply in order
    #[arg(value_enum)]
    pub ops: Vec<CounterOp>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    #[value(alias = "+")]
    Inc,
    #[value(alias = "-")]
    Dec,
    Reset,
}

fn apply(ops: &[CounterOp]) -> Counter {
    let mut counter = Counter::new();
    for op in ops {
        match op {
            CounterOp::Inc => counter.increment(),
            CounterOp::Dec => counter.decrement(),
            CounterOp::Reset => counter.reset(),
        }
    }
    counter
}

pub fn run_counter(args: CounterArgs) -> Result<()> {
    let counter = apply(&args.ops);

    if args.json {
        println!("{}", serde_json::json!({ "count": counter.value(), "tone": counter.tone() }));
        return Ok(());
    }

    let line = counter.to_string();
    if counter.tone() == Tone::Negative && std::io::stdout().is_terminal() {
        println!("{}", line.as_str().red());
    } else {
        println!("{}", line);
    }

    Ok(())
}
