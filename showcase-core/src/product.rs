//! Product records and the searchable catalog

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowcaseError};

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier
    pub id: u32,
    /// Display name, matched against queries
    pub name: String,
    /// Price in whole dollars
    pub price: u32,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Case-insensitive substring match against the name.
    ///
    /// An empty query matches every product.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.price)
    }
}

/// Immutable, ordered list of products fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and blank names
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(ShowcaseError::config(format!(
                    "duplicate product id {} in catalog",
                    product.id
                )));
            }
            if product.name.trim().is_empty() {
                return Err(ShowcaseError::config(format!(
                    "product {} has an empty name",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Products matching `query`, in catalog order
    pub fn filter(&self, query: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| product.matches(query))
            .cloned()
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let products = [
            (1, "Laptop", 999),
            (2, "Laptop Pro", 1299),
            (3, "Laptop Air", 1099),
            (4, "Smartphone", 699),
            (5, "Smartphone Plus", 799),
            (6, "Smartphone Mini", 599),
            (7, "Tablet", 499),
            (8, "Tablet Pro", 699),
            (9, "Tablet Mini", 399),
            (10, "Smartwatch", 299),
            (11, "Smartwatch Pro", 399),
            (12, "Smartwatch Lite", 199),
            (13, "Headphones", 199),
            (14, "Headphones Wireless", 249),
            (15, "Headphones Pro", 299),
        ]
        .into_iter()
        .map(|(id, name, price)| Product::new(id, name, price))
        .collect();

        Self { products }
    }
}
