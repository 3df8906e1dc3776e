//! showcase CLI - interactive examples: counter, debounced product search, todo list
//!
//! This is the main entry point for the showcase command-line tool, which provides:
//! - One-shot debounced product search (`search`)
//! - Scripted typing sessions streamed as NDJSON events (`simulate`)
//! - Counter and todo list examples (`counter`, `todo`)
//! - A terminal UI hosting every page live (`tui`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use showcase_core::Page;

mod commands;
mod tracing_setup;
mod tui;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    author,
    version,
    about = "Interactive examples: counter, debounced product search, todo list",
    long_about = "Small state-management examples. The product search waits for a quiet \
                  period after the last keystroke before querying a simulated backend."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.showcase/config.toml)
    #[arg(long, global = true, env = "SHOWCASE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the example pages and their routes
    Pages(commands::pages::PagesArgs),
    /// Run one debounced product search and print the results
    Search(commands::search::SearchArgs),
    /// Replay a typing session and stream search events as NDJSON
    Simulate(commands::simulate::SimulateArgs),
    /// Apply counter operations and print the count
    Counter(commands::counter::CounterArgs),
    /// Drive a todo list from commands on stdin
    Todo(commands::todo::TodoArgs),
    /// Open the interactive terminal UI
    Tui(TuiArgs),
    /// Manage showcase configuration (init, show, path)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct TuiArgs {
    /// Page to open first (counter, search, todo or its /path)
    #[arg(long, value_parser = parse_page)]
    page: Option<Page>,

    #[command(flatten)]
    tuning: commands::SearchTuning,
}

fn parse_page(value: &str) -> Result<Page, String> {
    let path = if value.starts_with('/') {
        value.to_lowercase()
    } else {
        format!("/{}", value.to_lowercase())
    };
    Page::from_path(&path).ok_or_else(|| format!("unknown page: {}", value))
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines on stderr would tear the alternate screen
    if !matches!(cli.command, Commands::Tui(_)) {
        tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    }

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Pages(args) => commands::run_pages(args)?,
        Commands::Search(args) => commands::run_search(args, config_path).await?,
        Commands::Simulate(args) => commands::run_simulate(args, config_path).await?,
        Commands::Counter(args) => commands::run_counter(args)?,
        Commands::Todo(args) => commands::run_todo(args)?,
        Commands::Tui(args) => {
            let config = commands::load_config(config_path, &args.tuning)?;
            tui::run(config, args.page).await?
        }
        Commands::Config(args) => commands::run_config(args, config_path)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_accepts_name_and_path() {
        assert_eq!(parse_page("search"), Ok(Page::Search));
        assert_eq!(parse_page("/todo"), Ok(Page::Todo));
        assert_eq!(parse_page("Counter"), Ok(Page::Counter));
        assert!(parse_page("settings").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
