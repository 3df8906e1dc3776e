//! Core application state and page management

use std::collections::VecDeque;
use std::sync::Arc;

use showcase_core::search::SearchOptions;
use showcase_core::{
    Counter, Page, ProductSource, SearchController, SearchEvent, SearchState, TodoList,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::simulate::describe;

/// Activity lines kept for the search page log
const ACTIVITY_LINES: usize = 50;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - select items, switch tabs
    #[default]
    Normal,
    /// Edit mode - keys go to the todo input box
    Edit,
}

/// Active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Page(Page),
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Home,
        Tab::Page(Page::Counter),
        Tab::Page(Page::Search),
        Tab::Page(Page::Todo),
    ];

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Page(page) => page.index() + 1,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Page(page) => page.name(),
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Everything the run loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input from the reader thread
    Input(crossterm::event::Event),
    /// Controller event from the search page mounted as `mount`
    Search { mount: u64, event: SearchEvent },
}

/// Live search page: a controller plus the forwarder feeding its events
pub struct SearchView {
    pub controller: SearchController,
    pub activity: VecDeque<String>,
    mount: u64,
    failed: bool,
    forwarder: JoinHandle<()>,
}

impl SearchView {
    fn mount(
        source: Arc<dyn ProductSource>,
        options: SearchOptions,
        mount: u64,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let mut controller = SearchController::new(source, options);
        let mut events = controller.events();

        let forwarder = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if tx.send(AppEvent::Search { mount, event }).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });

        controller.mount();

        Self {
            controller,
            activity: VecDeque::new(),
            mount,
            failed: false,
            forwarder,
        }
    }

    pub fn state(&self) -> SearchState {
        self.controller.state()
    }

    /// A failed fetch ends the search session; the page only shows the error.
    ///
    /// Stays true once seen, even if a later fetch clears the controller error.
    pub fn has_failed(&self) -> bool {
        self.failed || self.controller.state().has_failed()
    }

    /// Latch a failure visible in the current state
    pub fn latch_failure(&mut self) -> bool {
        self.failed = self.has_failed();
        self.failed
    }

    fn record(&mut self, event: &SearchEvent) {
        if let SearchEvent::FetchFailed { applied: true, .. } = event {
            self.failed = true;
        }
        if self.activity.len() == ACTIVITY_LINES {
            self.activity.pop_front();
        }
        self.activity.push_back(describe(event));
    }
}

impl Drop for SearchView {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Todo page: the list plus the selected row
#[derive(Debug, Default)]
pub struct TodoView {
    pub list: TodoList,
    pub selected: usize,
}

impl TodoView {
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.list.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.list.items().get(self.selected).map(|todo| todo.id)
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }
}

/// State of the page behind the active tab.
///
/// Switching tabs unmounts the current page, so page state starts fresh on
/// every visit.
pub enum View {
    Home { selected: usize },
    Counter(Counter),
    Search(SearchView),
    Todo(TodoView),
}

/// Main application state
pub struct App {
    /// Current input mode
    pub mode: Mode,
    /// Active tab
    pub tab: Tab,
    /// Page mounted for the active tab
    pub view: View,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    source: Arc<dyn ProductSource>,
    options: SearchOptions,
    events: mpsc::Sender<AppEvent>,
    mounts: u64,
}

impl App {
    pub fn new(
        source: Arc<dyn ProductSource>,
        options: SearchOptions,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            mode: Mode::Normal,
            tab: Tab::Home,
            view: View::Home { selected: 0 },
            should_quit: false,
            status_message: None,
            source,
            options,
            events,
            mounts: 0,
        }
    }

    /// Unmount the current page and mount the one for `tab`
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.mode = Mode::Normal;
        self.status_message = None;
        self.view = match tab {
            Tab::Home => View::Home { selected: 0 },
            Tab::Page(Page::Counter) => View::Counter(Counter::new()),
            Tab::Page(Page::Search) => {
                self.mounts += 1;
                View::Search(SearchView::mount(
                    Arc::clone(&self.source),
                    self.options.clone(),
                    self.mounts,
                    self.events.clone(),
                ))
            }
            Tab::Page(Page::Todo) => View::Todo(TodoView::default()),
        };
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.switch_tab(self.tab.prev());
    }

    /// Feed a controller event to the search page it belongs to
    pub fn on_search_event(&mut self, mount: u64, event: SearchEvent) {
        if let View::Search(view) = &mut self.view {
            if view.mount == mount {
                view.record(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::MockSource;
    use std::time::Duration;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let options = SearchOptions {
            debounce: Duration::from_millis(750),
            ..SearchOptions::default()
        };
        (App::new(Arc::new(MockSource::new()), options, tx), rx)
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Home.next(), Tab::Page(Page::Counter));
        assert_eq!(Tab::Page(Page::Todo).next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Page(Page::Todo));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_tab_mounts_and_forwards_events() {
        let (mut app, mut rx) = app();
        app.switch_tab(Tab::Page(Page::Search));

        tokio::time::sleep(Duration::from_millis(800)).await;

        let mut fetches = 0;
        while let Ok(AppEvent::Search { mount, event }) = rx.try_recv() {
            if event.is_fetch_start() {
                fetches += 1;
            }
            app.on_search_event(mount, event);
        }
        assert_eq!(fetches, 1);

        let View::Search(view) = &app.view else {
            panic!("search page not mounted");
        };
        assert_eq!(view.state().results.len(), 15);
        assert!(!view.activity.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_stays_after_older_fetch_succeeds() {
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
        tokio::time::sleep(Duration::from_millis(800)).await;

        while let Ok(AppEvent::Search { mount, event }) = rx.try_recv() {
            app.on_search_event(mount, event);
        }
        {
            let View::Search(view) = &app.view else {
                panic!("search page not mounted");
            };
            assert!(view.state().has_failed());
            assert!(view.has_failed());
        }

        // The slow "a" fetch resolves last and clears the controller error
        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(AppEvent::Search { mount, event }) = rx.try_recv() {
            app.on_search_event(mount, event);
        }

        let View::Search(view) = &app.view else {
            panic!("search page not mounted");
        };
        assert!(!view.state().has_failed());
        assert!(view.has_failed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_tabs_resets_page_state() {
        let (mut app, _rx) = app();
        app.switch_tab(Tab::Page(Page::Counter));
        if let View::Counter(counter) = &mut app.view {
            counter.increment();
        }

        app.next_tab();
        app.prev_tab();

        let View::Counter(counter) = &app.view else {
            panic!("counter page not mounted");
        };
        assert_eq!(counter.value(), 0);
    }
}
