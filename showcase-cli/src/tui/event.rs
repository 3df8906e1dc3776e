//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use showcase_core::Page;
use tokio::sync::mpsc;

use super::app::{App, AppEvent, Mode, Tab, TodoView, View};

/// How often the reader thread checks whether the app has gone away
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Forward terminal input to the run loop from a blocking thread.
///
/// Stops once the receiving side is dropped or the terminal errors.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match poll_event(POLL_INTERVAL) {
            Ok(Some(event)) => {
                if tx.blocking_send(AppEvent::Input(event)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(_) => break,
        }
    })
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
            app.should_quit = true;
            return;
        }
    }

    // Tab switching works everywhere, including while typing
    match key.code {
        KeyCode::Tab => return app.next_tab(),
        KeyCode::BackTab => return app.prev_tab(),
        _ => {}
    }

    match &mut app.view {
        View::Home { selected } => {
            let count = Page::ALL.len();
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => *selected = (*selected + 1) % count,
                KeyCode::Char('k') | KeyCode::Up => *selected = (*selected + count - 1) % count,
                KeyCode::Enter => {
                    let page = Page::ALL[*selected];
                    app.switch_tab(Tab::Page(page));
                }
                KeyCode::Char(c @ '1'..='3') => {
                    let idx = (c as usize) - ('1' as usize);
                    app.switch_tab(Tab::Page(Page::ALL[idx]));
                }
                _ => {}
            }
        }
        View::Counter(counter) => match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => counter.increment(),
            KeyCode::Char('-') | KeyCode::Down => counter.decrement(),
            KeyCode::Char('0') | KeyCode::Char('r') => counter.reset(),
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Esc => app.switch_tab(Tab::Home),
            _ => {}
        },
        View::Search(view) => {
            if key.code == KeyCode::Esc {
                return app.switch_tab(Tab::Home);
            }
            // The error screen replaces the page until it is left
            if view.latch_failure() {
                return;
            }

            let mut query = view.state().query;
            match key.code {
                KeyCode::Enter => view.controller.submit_now(),
                KeyCode::Backspace => {
                    if query.pop().is_some() {
                        view.controller.set_query(query);
                    }
                }
                KeyCode::Char(c) => {
                    query.push(c);
                    view.controller.set_query(query);
                }
                _ => {}
            }
        }
        View::Todo(view) => match app.mode {
            Mode::Edit => handle_todo_input(&mut app.mode, &mut app.status_message, view, key),
            Mode::Normal => match key.code {
                KeyCode::Char('i') | KeyCode::Char('a') => app.mode = Mode::Edit,
                KeyCode::Char('j') | KeyCode::Down => view.select_next(),
                KeyCode::Char('k') | KeyCode::Up => view.select_prev(),
                KeyCode::Char(' ') | KeyCode::Char('c') | KeyCode::Enter => {
                    if let Some(id) = view.selected_id() {
                        view.list.toggle(id);
                    }
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(id) = view.selected_id() {
                        view.list.delete(id);
                        view.clamp_selection();
                    }
                }
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Esc => app.switch_tab(Tab::Home),
                _ => {}
            },
        },
    }
}

/// Handle keys while the todo input box has focus
fn handle_todo_input(
    mode: &mut Mode,
    status: &mut Option<String>,
    view: &mut TodoView,
    key: KeyEvent,
) {
    *status = None;
    match key.code {
        KeyCode::Esc => *mode = Mode::Normal,
        KeyCode::Enter => match view.list.submit() {
            Some(id) => {
                view.selected = view.list.len() - 1;
                *status = Some(format!("Added todo #{}", id));
            }
            None => *status = Some("Nothing to add".to_string()),
        },
        KeyCode::Backspace => {
            view.list.draft_mut().pop();
        }
        KeyCode::Char(c) => view.list.draft_mut().push(c),
        _ => {}
    }
}

/// Dispatch one event from the run loop
pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Input(Event::Key(key)) => handle_key(app, key),
        AppEvent::Input(_) => {
            // Resize and friends are picked up by the next draw
        }
        AppEvent::Search { mount, event } => app.on_search_event(mount, event),
    }
}
