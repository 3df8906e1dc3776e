//! Showcase TUI - the example pages as live terminal screens
//!
//! - Home lists the examples; Tab / Shift+Tab cycle through pages
//! - Counter: +/- and reset, red while negative
//! - Search: debounced product search with a live activity log
//! - Todo: add, complete/undo and delete items
//!
//! Terminal input is read on a blocking thread and merged with search
//! controller events into one channel that drives the render loop.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
