//! Product source trait and implementations
//!
//! Provides the data-source seam the search controller queries through:
//! - `CatalogSource`: simulated backend with fixed latency over an in-memory catalog
//! - `MockSource`: records every query, answers without waiting unless told to

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, ShowcaseError};
use crate::product::{Catalog, Product};

/// Simulated network latency of the default source
pub const DEFAULT_LATENCY_MS: u64 = 500;

/// Asynchronous product lookup (testable)
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self, query: &str) -> Result<Vec<Product>>;
}

/// Simulated backend: filters the catalog after a fixed delay
#[derive(Debug, Clone)]
pub struct CatalogSource {
    catalog: Arc<Catalog>,
    latency: Duration,
    fail: bool,
}

impl CatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            fail: false,
        }
    }

    /// Override the artificial latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every fetch reject once its latency has elapsed
    pub fn with_failure(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

#[async_trait]
impl ProductSource for CatalogSource {
    async fn fetch_products(&self, query: &str) -> Result<Vec<Product>> {
        tokio::time::sleep(self.latency).await;

        if self.fail {
            return Err(ShowcaseError::fetch_failed(query, "simulated backend failure"));
        }

        let products = self.catalog.filter(query);
        debug!(query, matches = products.len(), "catalog lookup");
        Ok(products)
    }
}

/// Recording source for tests and dry runs
#[derive(Debug, Default)]
pub struct MockSource {
    catalog: Catalog,
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer from a custom catalog instead of the built-in one
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Delay the answer for one specific query
    pub fn with_delay(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(query.into(), delay);
        self
    }

    /// Reject one specific query
    pub fn with_failure(mut self, query: impl Into<String>) -> Self {
        self.failing.insert(query.into());
        self
    }

    /// Queries received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ProductSource for MockSource {
    async fn fetch_products(&self, query: &str) -> Result<Vec<Product>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(query) {
            return Err(ShowcaseError::fetch_failed(query, "mock failure"));
        }

        Ok(self.catalog.filter(query))
    }
}
