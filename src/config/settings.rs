//! Settings loading from config.toml
//!
//! Everything in the file is optional: a missing file, a missing table, or a missing
//! key all fall back to the defaults below. Secrets (the Discord token, the catalog
//! API key) are read from the environment instead, see `main.rs`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    /// Card catalog API settings
    pub catalog: CatalogSettings,
    /// Reaction-removal cache limits
    pub reactions: ReactionSettings,
    /// Listing scraper settings
    pub scraper: ScraperSettings,
}

/// Card catalog API settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the catalog API, without trailing slash
    pub base_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.pokemontcg.io/v2".to_string(),
        }
    }
}

/// Limits for the message → wishlist item cache used by reaction removal
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReactionSettings {
    /// Maximum number of tracked messages; the oldest is dropped past this
    pub capacity: usize,
    /// How long a rendered wishlist message stays removable, in seconds
    pub ttl_secs: u64,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            capacity: 500,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

impl ReactionSettings {
    /// TTL as a [`Duration`]
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Listing scraper settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScraperSettings {
    /// WebDriver endpoint (chromedriver)
    pub webdriver_url: String,
    /// How long to wait for the listing title to render, in seconds
    pub wait_timeout_secs: u64,
    /// Provenance tag written to every price record
    pub source_label: String,
    /// CSS selector of the listing title
    pub title_selector: String,
    /// CSS selector of the price; the first match is used
    pub price_selector: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout_secs: 60,
            source_label: "eBay".to_string(),
            title_selector: "h1.x-item-title__mainTitle span.ux-textspans--BOLD".to_string(),
            price_selector: "div.x-price-primary span.ux-textspans".to_string(),
        }
    }
}

impl ScraperSettings {
    /// Title wait timeout as a [`Duration`]
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a key has the wrong type.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, using defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No config file at {:?}, using default settings", path);
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_settings(&contents)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [catalog]
            base_url = "http://localhost:8080/v2"

            [reactions]
            capacity = 10
            ttl_secs = 60

            [scraper]
            webdriver_url = "http://chromedriver:4444"
            wait_timeout_secs = 5
            source_label = "eBay UK"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.catalog.base_url, "http://localhost:8080/v2");
        assert_eq!(settings.reactions.capacity, 10);
        assert_eq!(settings.reactions.ttl(), Duration::from_secs(60));
        assert_eq!(settings.scraper.webdriver_url, "http://chromedriver:4444");
        assert_eq!(settings.scraper.wait_timeout(), Duration::from_secs(5));
        assert_eq!(settings.scraper.source_label, "eBay UK");
        // Selectors were not given and keep their defaults
        assert_eq!(
            settings.scraper.title_selector,
            "h1.x-item-title__mainTitle span.ux-textspans--BOLD"
        );
    }

    #[test]
    fn test_parse_empty_settings_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.catalog.base_url, "https://api.pokemontcg.io/v2");
        assert_eq!(settings.reactions.capacity, 500);
        assert_eq!(settings.scraper.wait_timeout_secs, 60);
        assert_eq!(settings.scraper.source_label, "eBay");
    }

    #[test]
    fn test_parse_invalid_settings() {
        let result = parse_settings("[reactions]\ncapacity = \"lots\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = load_settings("definitely/not/here/config.toml").unwrap();
        assert_eq!(settings.reactions.capacity, 500);
    }
}
