//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use showcase_core::{Counter, Page, Tone, FETCH_FAILED_MESSAGE};

use super::app::{App, Mode, SearchView, Tab, TodoView, View};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab header
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    match &app.view {
        View::Home { selected } => render_home(frame, *selected, chunks[1]),
        View::Counter(counter) => render_counter(frame, counter, chunks[1]),
        View::Search(view) => render_search(frame, view, chunks[1]),
        View::Todo(view) => render_todo(frame, view, app.mode, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

/// Render the tab header
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| format!("{}:{}", tab.index(), tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Showcase ")
                .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn bordered(title: impl Into<String>, focused: bool) -> Block<'static> {
    let color = if focused { ACCENT } else { SECONDARY };
    Block::default()
        .title(title.into())
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Home page: one entry per example
fn render_home(frame: &mut Frame, selected: usize, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let style = if idx == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let content = format!("{:<8} {:<10} {}", page.name(), page.path(), page.description());
            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(bordered(" Examples ", true)), area);
}

/// Counter page: the count, red while negative
fn render_counter(frame: &mut Frame, counter: &Counter, area: Rect) {
    let color = match counter.tone() {
        Tone::Negative => ERROR,
        Tone::Normal => Color::White,
    };

    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            counter.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[+] Increment   [-] Decrement   [0] Reset", Style::default().fg(DIM))),
    ]);

    frame.render_widget(Paragraph::new(text).block(bordered(" Counter ", true)), area);
}

/// Search page: input, results (or the error screen) and the activity log
fn render_search(frame: &mut Frame, view: &SearchView, area: Rect) {
    let state = view.state();

    if view.has_failed() {
        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Error: {}", FETCH_FAILED_MESSAGE),
                Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Esc: back to Home", Style::default().fg(DIM))),
        ]);
        let paragraph = Paragraph::new(text)
            .block(bordered(" Search ", false).border_style(Style::default().fg(ERROR)))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    let input = Paragraph::new(format!("{}|", state.query))
        .block(bordered(" Search products... ", true));
    frame.render_widget(input, left[0]);

    let title = if state.loading {
        " Searching... ".to_string()
    } else {
        format!(" Results ({}) ", state.results.len())
    };

    let items: Vec<ListItem> = if state.results.is_empty() && !state.loading {
        vec![ListItem::new(Line::from(Span::styled(
            "  No products found",
            Style::default().fg(DIM),
        )))]
    } else {
        state
            .results
            .iter()
            .map(|product| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<14}", product.name), Style::default().fg(Color::White)),
                    Span::styled(format!("${}", product.price), Style::default().fg(SUCCESS)),
                ]))
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(bordered(title, false)), left[1]);

    let visible = columns[1].height.saturating_sub(2) as usize;
    let log: Vec<ListItem> = view
        .activity
        .iter()
        .skip(view.activity.len().saturating_sub(visible))
        .map(|line| ListItem::new(Line::from(Span::styled(line.as_str(), Style::default().fg(DIM)))))
        .collect();
    frame.render_widget(List::new(log).block(bordered(" Activity ", false)), columns[1]);
}

/// Todo page: input box plus the list
fn render_todo(frame: &mut Frame, view: &TodoView, mode: Mode, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let editing = mode == Mode::Edit;
    let input = if editing {
        Paragraph::new(format!("{}|", view.list.draft()))
    } else if view.list.draft().is_empty() {
        Paragraph::new(Span::styled("Add a todo... (press 'i')", Style::default().fg(DIM)))
    } else {
        Paragraph::new(view.list.draft())
    };
    frame.render_widget(input.block(bordered(" New todo ", editing)), chunks[0]);

    let items: Vec<ListItem> = if view.list.is_empty() {
        vec![ListItem::new(Line::from(Span::styled("  No todos", Style::default().fg(DIM))))]
    } else {
        view.list
            .items()
            .iter()
            .enumerate()
            .map(|(idx, todo)| {
                let mut text_style = Style::default().fg(Color::White);
                if todo.completed {
                    text_style = text_style.fg(DIM).add_modifier(Modifier::CROSSED_OUT);
                }
                if idx == view.selected && !editing {
                    text_style = text_style.bg(SECONDARY).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(vec![
                    Span::styled(todo.text.clone(), text_style),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", todo.toggle_label()), Style::default().fg(SUCCESS)),
                    Span::raw(" "),
                    Span::styled("[Delete]", Style::default().fg(ERROR)),
                ]))
            })
            .collect()
    };

    let title = format!(" Todos ({}/{} done) ", view.list.completed(), view.list.len());
    frame.render_widget(List::new(items).block(bordered(title, !editing)), chunks[1]);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::Edit => Span::styled(" EDIT ", Style::default().bg(SUCCESS).fg(Color::Black)),
    };

    let help_text = match (&app.view, app.mode) {
        (View::Home { .. }, _) => "j/k:nav  Enter:open  1-3:jump  Tab:next tab  q:quit",
        (View::Counter(_), _) => "+/-:change  0:reset  Tab:next tab  Esc:home  q:quit",
        (View::Search(_), _) => "Type to search  Enter:search now  Tab:next tab  Esc:home",
        (View::Todo(_), Mode::Edit) => "Enter:add  Esc:done editing",
        (View::Todo(_), Mode::Normal) => {
            "i:add  j/k:nav  Space:complete/undo  d:delete  Esc:home  q:quit"
        }
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::AppEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use showcase_core::search::SearchOptions;
    use showcase_core::MockSource;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_home_lists_pages() {
        let (tx, _rx) = mpsc::channel(8);
        let app = App::new(Arc::new(MockSource::new()), SearchOptions::default(), tx);

        let screen = draw(&app);
        assert!(screen.contains("/counter"));
        assert!(screen.contains("Data fetching and filtering"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_error_screen() {
        let (tx, _rx) = mpsc::channel(8);
        let source = MockSource::new().with_failure("");
        let mut app = App::new(Arc::new(source), SearchOptions::default(), tx);
        app.switch_tab(Tab::Page(Page::Search));

        if let View::Search(view) = &app.view {
            view.controller.settled().await;
        }

        let screen = draw(&app);
        assert!(screen.contains("Error: Failed to fetch products"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_screen_survives_later_success() {
        let (tx, mut rx) = mpsc::channel(64);
        let source = MockSource::new()
            .with_delay("a", Duration::from_secs(2))
            .with_failure("ab");
        let mut app = App::new(Arc::new(source), SearchOptions::default(), tx);
        app.switch_tab(Tab::Page(Page::Search));

        if let View::Search(view) = &mut app.view {
            view.controller.set_query("a");
        }
        tokio::time::sleep(Duration::from_millis(800)).await;
        if let View::Search(view) = &mut app.view {
            view.controller.set_query("ab");
        }
        tokio::time::sleep(Duration::from_secs(3)).await;

        while let Ok(AppEvent::Search { mount, event }) = rx.try_recv() {
            app.on_search_event(mount, event);
        }

        let screen = draw(&app);
        assert!(screen.contains("Error: Failed to fetch products"));
        assert!(!screen.contains("Laptop"));
    }
}
