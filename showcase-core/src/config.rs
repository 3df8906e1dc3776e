use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ShowcaseError};
use crate::product::{Catalog, Product};
use crate::search::{SearchOptions, StaleResults, DEFAULT_DEBOUNCE_MS};
use crate::source::{CatalogSource, DEFAULT_LATENCY_MS};

/// Environment variable pointing at an alternate config file
pub const CONFIG_ENV: &str = "SHOWCASE_CONFIG";

/// Centralized configuration for the showcase pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub latency_ms: u64,
    pub stale_results: StaleResults,
    pub simulate_failure: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            latency_ms: DEFAULT_LATENCY_MS,
            stale_results: StaleResults::Apply,
            simulate_failure: false,
        }
    }
}

/// Optional replacement for the built-in catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl ShowcaseConfig {
    /// Load config from `$SHOWCASE_CONFIG` or ~/.showcase/config.toml
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific file.
    ///
    /// A missing file yields the built-in defaults; environment overrides
    /// apply either way.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            debug!(path = %path.display(), "loaded config");
            config
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Get config file path: `$SHOWCASE_CONFIG` or ~/.showcase/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".showcase/config.toml")
    }

    /// Apply SHOWCASE_DEBOUNCE_MS / SHOWCASE_LATENCY_MS style overrides
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SHOWCASE_DEBOUNCE_MS") {
            self.search.debounce_ms = parse_millis("SHOWCASE_DEBOUNCE_MS", &value)?;
        }
        if let Some(value) = lookup("SHOWCASE_LATENCY_MS") {
            self.search.latency_ms = parse_millis("SHOWCASE_LATENCY_MS", &value)?;
        }
        Ok(())
    }

    /// Check the catalog override is usable
    pub fn validate(&self) -> Result<()> {
        self.catalog().map(|_| ())
    }

    /// Configured catalog, or the built-in one when none is set
    pub fn catalog(&self) -> Result<Catalog> {
        if self.catalog.products.is_empty() {
            Ok(Catalog::default())
        } else {
            Catalog::new(self.catalog.products.clone())
        }
    }

    /// Simulated backend described by this config
    pub fn source(&self) -> Result<CatalogSource> {
        Ok(CatalogSource::new(self.catalog()?)
            .with_latency(Duration::from_millis(self.search.latency_ms))
            .with_failure(self.search.simulate_failure))
    }

    /// Controller options described by this config
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            debounce: Duration::from_millis(self.search.debounce_ms),
            stale_results: self.search.stale_results,
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        ShowcaseError::config(format!("{} must be a number of milliseconds, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ShowcaseConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.search.debounce_ms, 750);
        assert_eq!(config.search.latency_ms, 500);
        assert_eq!(config.search.stale_results, StaleResults::Apply);
        assert_eq!(config.catalog().unwrap().len(), 15);
    }

    #[test]
    fn test_parse_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[search]
debounce_ms = 300
stale_results = "discard"

[[catalog.products]]
id = 1
name = "Keyboard"
price = 89
"#,
        )
        .unwrap();

        let config = ShowcaseConfig::load_from(&path).unwrap();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.latency_ms, 500);
        assert_eq!(config.search.stale_results, StaleResults::Discard);
        assert_eq!(
            config.catalog().unwrap().products(),
            &[Product::new(1, "Keyboard", 89)]
        );
        assert_eq!(config.search_options().debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_duplicate_catalog_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[[catalog.products]]
id = 4
name = "A"
price = 1

[[catalog.products]]
id = 4
name = "B"
price = 2
"#,
        )
        .unwrap();

        let err = ShowcaseConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ShowcaseError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\ndebounce_ms = \"soon\"\n").unwrap();

        let err = ShowcaseConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ShowcaseError::TomlParse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            [("SHOWCASE_DEBOUNCE_MS", "10"), ("SHOWCASE_LATENCY_MS", " 0 ")].into();
        let mut config = ShowcaseConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.search.debounce_ms, 10);
        assert_eq!(config.search.latency_ms, 0);

        let err = config
            .apply_overrides(|key| (key == "SHOWCASE_LATENCY_MS").then(|| "fast".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SHOWCASE_LATENCY_MS"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = ShowcaseConfig::default();
        config.search.simulate_failure = true;
        config.save_to(&path).unwrap();

        let reloaded = ShowcaseConfig::load_from(&path).unwrap();
        assert!(reloaded.search.simulate_failure);
        assert!(reloaded.to_toml().unwrap().contains("stale_results = \"apply\""));
    }
}
