//! Registry of the example pages

use serde::Serialize;

/// An example page and the interaction pattern it demonstrates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Counter,
    Search,
    Todo,
}

impl Page {
    /// All pages, in navigation order
    pub const ALL: [Page; 3] = [Page::Counter, Page::Search, Page::Todo];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Counter => "Counter",
            Page::Search => "Search",
            Page::Todo => "Todo",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Counter => "/counter",
            Page::Search => "/search",
            Page::Todo => "/todo",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Page::Counter => "State management example",
            Page::Search => "Data fetching and filtering",
            Page::Todo => "CRUD operations example",
        }
    }

    /// Look a page up by its route path
    pub fn from_path(path: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Counter => 0,
            Page::Search => 1,
            Page::Todo => 2,
        }
    }
}
