//! Card catalog client - read-only lookups against the Pokémon TCG API.
//!
//! Every failure on this path (transport error, non-200 status, undecodable body)
//! degrades to "no results". The difference is only visible in the logs; callers
//! treat all of them as a catalog miss.

use crate::errors::{Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, instrument, warn};

/// A card printing as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    /// Canonical id of the printing (e.g., "base1-4")
    pub id: String,
    /// Display name (e.g., "Charizard")
    pub name: String,
    /// The set this printing belongs to
    pub set: CardSet,
    /// Artwork links, absent for some promos
    #[serde(default)]
    pub images: Option<CardImages>,
    /// Rarity label, when the catalog knows it
    #[serde(default)]
    pub rarity: Option<String>,
}

impl Card {
    /// Link to the artwork, preferring the large image over the thumbnail.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.large.as_deref().or(i.small.as_deref()))
    }
}

/// Set metadata embedded in a [`Card`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardSet {
    /// Set display name (e.g., "Base")
    pub name: String,
    /// Series the set belongs to
    #[serde(default)]
    pub series: Option<String>,
}

/// Artwork links embedded in a [`Card`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardImages {
    /// Thumbnail
    #[serde(default)]
    pub small: Option<String>,
    /// Full-size artwork
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CardList {
    #[serde(default)]
    data: Vec<Card>,
}

#[derive(Debug, Deserialize)]
struct SingleCard {
    data: Card,
}

/// Read access to a card catalog.
///
/// Both lookups are infallible from the caller's point of view: an unreachable or
/// misbehaving catalog looks the same as one with no matching cards.
pub trait CardCatalog: Send + Sync {
    /// Cards whose name matches `name`, in catalog order.
    fn search_by_name(&self, name: &str) -> impl Future<Output = Vec<Card>> + Send;

    /// The card with exactly this id.
    fn find_by_id(&self, card_id: &str) -> impl Future<Output = Option<Card>> + Send;
}

/// HTTP client for `api.pokemontcg.io` (or anything serving the same routes).
#[derive(Debug, Clone)]
pub struct PokemonTcgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PokemonTcgClient {
    /// Builds a client for `base_url`, e.g. `https://api.pokemontcg.io/v2`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pokevin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Catalog {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Option<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Catalog request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Catalog responded with status {}", status);
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Could not decode catalog response: {}", e);
                None
            }
        }
    }
}

/// Builds the `q` parameter for a name search.
///
/// Multi-word names must be quoted or the API treats the extra words as separate
/// search terms.
#[must_use]
pub fn name_query(name: &str) -> String {
    if name.chars().any(char::is_whitespace) {
        format!("name:\"{name}\"")
    } else {
        format!("name:{name}")
    }
}

impl CardCatalog for PokemonTcgClient {
    #[instrument(skip(self))]
    async fn search_by_name(&self, name: &str) -> Vec<Card> {
        let url = format!("{}/cards", self.base_url);
        let request = self.get(&url).query(&[("q", name_query(name))]);

        let cards = self
            .fetch::<CardList>(request)
            .await
            .map(|list| list.data)
            .unwrap_or_default();
        debug!("Catalog returned {} cards for '{}'", cards.len(), name);
        cards
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, card_id: &str) -> Option<Card> {
        let url = format!("{}/cards/{}", self.base_url, card_id);
        let card = self
            .fetch::<SingleCard>(self.get(&url))
            .await
            .map(|single| single.data);
        debug!("Catalog lookup for id '{}' found: {}", card_id, card.is_some());
        card
    }
}
