//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use showcase_core::{Page, ShowcaseConfig};
use tokio::sync::mpsc;

use super::app::{App, AppEvent, Tab};
use super::event::{handle_event, spawn_reader};
use super::ui;

/// Redraw interval while nothing happens (keeps the loading indicator fresh)
const TICK: Duration = Duration::from_millis(250);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application, optionally opening `start` instead of Home
pub async fn run(config: ShowcaseConfig, start: Option<Page>) -> Result<()> {
    let source = Arc::new(config.source()?);

    // Initialize terminal
    let mut terminal = init_terminal()?;

    let (tx, mut rx) = mpsc::channel(256);
    let reader = spawn_reader(tx.clone());
    let mut app = App::new(source, config.search_options(), tx);
    if let Some(page) = start {
        app.switch_tab(Tab::Page(page));
    }

    // Main event loop
    let result = run_loop(&mut terminal, &mut app, &mut rx).await;

    // Unmount the current page and stop the reader thread
    drop(app);
    rx.close();
    reader.await.ok();

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick = tokio::time::interval(TICK);

    loop {
        // Render UI
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => handle_event(app, event),
                None => break,
            },
            _ = tick.tick() => {}
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
