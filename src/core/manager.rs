//! Wishlist manager - Card matching and the add/list/remove/clear lifecycle.
//!
//! The manager owns the catalog client and the reaction cache. Every operation returns
//! an outcome enum describing what happened; turning that into Discord messages is the
//! bot layer's job. Only storage failures surface as `Err`.

use crate::{
    core::{
        catalog::{Card, CardCatalog},
        input::{self, CardQuery, CardTuple, InputError},
        reaction_cache::ReactionCache,
        wishlist::{self, AddItemResult, WishlistKey},
    },
    entities::wishlist_item,
    errors::Result,
};
use rand::seq::IndexedRandom;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of [`WishlistManager::add_to_wishlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The argument was not 1 or 3 comma-separated segments
    InvalidFormat,
    /// Name-only query: one catalog printing picked at random as a usage example
    Suggestion(Card),
    /// The catalog had nothing for the name (nor for the id, on the full form)
    NoCardsFound {
        /// The name that was searched
        query: String,
    },
    /// Cards came back but none had exactly this set and id
    NoMatch(CardTuple),
    /// The owner already has this printing
    AlreadyPresent(WishlistKey),
    /// Stored a new item
    Added {
        /// The stored row
        item: wishlist_item::Model,
        /// Large artwork of the matched card, if the catalog has one
        image_url: Option<String>,
    },
}

/// Outcome of [`WishlistManager::remove_from_wishlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The argument was not exactly 3 comma-separated segments
    InvalidFormat,
    /// The item was deleted
    Removed(WishlistKey),
    /// No such item for this owner
    NotFound(WishlistKey),
}

/// Outcome of [`WishlistManager::remove_by_reaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The message is not (or no longer) a tracked wishlist entry
    Untracked,
    /// Someone other than the owner reacted; nothing was changed
    NotOwner(WishlistKey),
    /// The item was deleted and the message is no longer tracked
    Removed(WishlistKey),
    /// The item was already gone; the message is no longer tracked
    NotFound(WishlistKey),
}

/// Resolves card descriptions against a catalog and manages stored wishlists.
#[derive(Debug)]
pub struct WishlistManager<C> {
    catalog: C,
    reactions: Arc<ReactionCache>,
}

impl<C: CardCatalog> WishlistManager<C> {
    /// Creates a manager over `catalog` that tracks rendered messages in `reactions`.
    pub const fn new(catalog: C, reactions: Arc<ReactionCache>) -> Self {
        Self { catalog, reactions }
    }

    /// The catalog this manager queries.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The reaction cache handle.
    #[must_use]
    pub fn reactions(&self) -> Arc<ReactionCache> {
        Arc::clone(&self.reactions)
    }

    /// Handles `add_wishlist`: suggests a printing for a bare name, or matches a full
    /// `name, set, id` triple against the catalog and stores it.
    ///
    /// The first catalog card whose set name and id both equal the user's (exactly,
    /// case-sensitive) wins. The stored card name is the catalog's name for it.
    #[instrument(skip(self, db))]
    pub async fn add_to_wishlist(
        &self,
        db: &DatabaseConnection,
        owner_id: &str,
        raw: &str,
    ) -> Result<AddOutcome> {
        let tuple = match input::parse_card_query(raw) {
            Err(InputError::InvalidFormat { segments }) => {
                debug!("Rejected add_wishlist input with {} segments", segments);
                return Ok(AddOutcome::InvalidFormat);
            }
            Ok(CardQuery::NameOnly(name)) => return Ok(self.suggest(name).await),
            Ok(CardQuery::Exact(tuple)) => tuple,
        };

        let mut cards = self.catalog.search_by_name(&tuple.card_name).await;
        if cards.is_empty() {
            debug!(
                "No cards named '{}', falling back to id '{}'",
                tuple.card_name, tuple.card_id
            );
            cards.extend(self.catalog.find_by_id(&tuple.card_id).await);
        }
        if cards.is_empty() {
            return Ok(AddOutcome::NoCardsFound {
                query: tuple.card_name,
            });
        }

        let Some(matched) = find_exact_match(&cards, &tuple.set_name, &tuple.card_id) else {
            return Ok(AddOutcome::NoMatch(tuple));
        };

        let key = WishlistKey::new(
            owner_id,
            matched.name.clone(),
            tuple.set_name,
            tuple.card_id,
        );
        if wishlist::item_exists(db, &key).await? {
            return Ok(AddOutcome::AlreadyPresent(key));
        }

        match wishlist::add_item(db, &key).await? {
            AddItemResult::Inserted(item) => {
                info!("Added {} to wishlist of {}", key, owner_id);
                Ok(AddOutcome::Added {
                    item,
                    image_url: matched.image_url().map(str::to_string),
                })
            }
            AddItemResult::AlreadyPresent => Ok(AddOutcome::AlreadyPresent(key)),
        }
    }

    async fn suggest(&self, name: String) -> AddOutcome {
        let cards = self.catalog.search_by_name(&name).await;
        let picked = cards.choose(&mut rand::rng()).cloned();
        match picked {
            Some(card) => AddOutcome::Suggestion(card),
            None => AddOutcome::NoCardsFound { query: name },
        }
    }

    /// The owner's wishlist in insertion order.
    pub async fn list_wishlist(
        &self,
        db: &DatabaseConnection,
        owner_id: &str,
    ) -> Result<Vec<wishlist_item::Model>> {
        wishlist::get_items_for_owner(db, owner_id).await
    }

    /// Records that `message_id` renders `item`, so a reaction on it can remove it.
    pub async fn track_rendered(&self, message_id: u64, item: &wishlist_item::Model) {
        self.reactions.insert(message_id, WishlistKey::from(item)).await;
    }

    /// Handles `remove_wishlist`: deletes the exact `name, set, id` triple.
    #[instrument(skip(self, db))]
    pub async fn remove_from_wishlist(
        &self,
        db: &DatabaseConnection,
        owner_id: &str,
        raw: &str,
    ) -> Result<RemoveOutcome> {
        let Ok(tuple) = input::parse_card_tuple(raw) else {
            return Ok(RemoveOutcome::InvalidFormat);
        };

        let key = WishlistKey::new(owner_id, tuple.card_name, tuple.set_name, tuple.card_id);
        if wishlist::remove_item(db, &key).await? {
            info!("Removed {} from wishlist of {}", key, owner_id);
            Ok(RemoveOutcome::Removed(key))
        } else {
            Ok(RemoveOutcome::NotFound(key))
        }
    }

    /// Handles a removal reaction by `reactor_id` on `message_id`.
    ///
    /// Only the owner of the rendered item can remove it this way.
    #[instrument(skip(self, db))]
    pub async fn remove_by_reaction(
        &self,
        db: &DatabaseConnection,
        message_id: u64,
        reactor_id: &str,
    ) -> Result<ReactionOutcome> {
        let Some(key) = self.reactions.get(message_id).await else {
            return Ok(ReactionOutcome::Untracked);
        };

        if key.owner_id != reactor_id {
            debug!("User {} reacted to {}'s wishlist entry", reactor_id, key.owner_id);
            return Ok(ReactionOutcome::NotOwner(key));
        }

        let removed = wishlist::remove_item(db, &key).await?;
        self.reactions.remove(message_id).await;
        if removed {
            info!("Removed {} from wishlist of {} by reaction", key, reactor_id);
            Ok(ReactionOutcome::Removed(key))
        } else {
            Ok(ReactionOutcome::NotFound(key))
        }
    }

    /// Handles `clear_wishlist`. Returns how many items were deleted.
    #[instrument(skip(self, db))]
    pub async fn clear_wishlist(&self, db: &DatabaseConnection, owner_id: &str) -> Result<u64> {
        let cleared = wishlist::clear_for_owner(db, owner_id).await?;
        info!("Cleared {} items from wishlist of {}", cleared, owner_id);
        Ok(cleared)
    }
}

/// First card (in catalog order) whose set name and id both equal the given values.
#[must_use]
pub fn find_exact_match<'a>(cards: &'a [Card], set_name: &str, card_id: &str) -> Option<&'a Card> {
    cards
        .iter()
        .find(|card| card.set.name == set_name && card.id == card_id)
}
