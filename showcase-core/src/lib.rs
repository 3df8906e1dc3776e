pub mod config;
pub mod counter;
pub mod debounce;
pub mod error;
pub mod events;
pub mod pages;
pub mod product;
pub mod search;
pub mod source;
pub mod todo;

pub use config::ShowcaseConfig;
pub use counter::{Counter, Tone};
pub use debounce::Debouncer;
pub use error::{Result, ShowcaseError, FETCH_FAILED_MESSAGE};
pub use events::SearchEvent;
pub use pages::Page;
pub use product::{Catalog, Product};
pub use search::{SearchController, SearchOptions, SearchPhase, SearchState, StaleResults};
pub use source::{CatalogSource, MockSource, ProductSource};
pub use todo::{Todo, TodoList};
