//! Shared test utilities for `PokeVin`.
//!
//! This module provides helpers for setting up test databases and fakes for the two
//! outside collaborators of the core: the card catalog and the browser session.

use crate::{
    core::{
        catalog::{Card, CardCatalog, CardImages, CardSet},
        scraper::ListingSession,
        wishlist::WishlistKey,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The Base Set Charizard key for `owner_id`.
pub fn charizard_key(owner_id: &str) -> WishlistKey {
    WishlistKey::new(owner_id, "Charizard", "Base", "base1-4")
}

/// Builds a catalog card with a large image link.
pub fn test_card(id: &str, name: &str, set_name: &str) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        set: CardSet {
            name: set_name.to_string(),
            series: None,
        },
        images: Some(CardImages {
            small: None,
            large: Some(format!("https://images.example/{id}.png")),
        }),
        rarity: None,
    }
}

/// In-memory catalog that counts how often it is queried.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    /// Cards returned per exact name query
    pub by_name: HashMap<String, Vec<Card>>,
    /// Cards returned per id lookup
    pub by_id: HashMap<String, Card>,
    /// Number of name searches performed
    pub name_calls: AtomicUsize,
    /// Number of id lookups performed
    pub id_calls: AtomicUsize,
}

impl FakeCatalog {
    /// Registers `cards` as the answer to a name search for `name`.
    #[must_use]
    pub fn with_search(mut self, name: &str, cards: Vec<Card>) -> Self {
        self.by_name.insert(name.to_string(), cards);
        self
    }

    /// Registers `card` under its own id.
    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.by_id.insert(card.id.clone(), card);
        self
    }

    /// Total number of catalog calls made so far.
    pub fn total_calls(&self) -> usize {
        self.name_calls.load(Ordering::SeqCst) + self.id_calls.load(Ordering::SeqCst)
    }
}

impl CardCatalog for FakeCatalog {
    async fn search_by_name(&self, name: &str) -> Vec<Card> {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    async fn find_by_id(&self, card_id: &str) -> Option<Card> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);
        self.by_id.get(card_id).cloned()
    }
}

/// Scripted browser session. Selectors missing from `texts` fail like a real
/// element lookup would; `closed` flips when the session is released.
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    /// Inner text per CSS selector
    pub texts: HashMap<String, String>,
    /// Make `goto` fail
    pub fail_navigation: bool,
    /// Set once `close` has run
    pub closed: Arc<AtomicBool>,
}

impl FakeSession {
    /// A session whose page has the given title and price texts under the default
    /// selectors.
    pub fn with_listing(title: &str, price: &str) -> Self {
        let defaults = crate::config::settings::ScraperSettings::default();
        let mut texts = HashMap::new();
        texts.insert(defaults.title_selector, title.to_string());
        texts.insert(defaults.price_selector, price.to_string());
        Self {
            texts,
            ..Self::default()
        }
    }

    fn lookup(&self, selector: &str) -> Result<String> {
        self.texts.get(selector).cloned().ok_or_else(|| Error::Browser {
            message: format!("no element matches '{selector}'"),
        })
    }
}

impl ListingSession for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        if self.fail_navigation {
            return Err(Error::Browser {
                message: format!("navigation to {url} failed"),
            });
        }
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<()> {
        self.lookup(selector).map(|_| ())
    }

    async fn inner_text(&mut self, selector: &str) -> Result<String> {
        self.lookup(selector)
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
