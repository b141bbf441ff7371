//! Core business logic - framework-agnostic wishlist, catalog, and price operations.
//!
//! Nothing in here knows about Discord. The bot layer calls these functions and turns
//! their outcomes into messages; the scraper binary calls `scraper` directly.

/// Card catalog client (Pokémon TCG API)
pub mod catalog;
/// Parsing of comma-separated card arguments
pub mod input;
/// Wishlist manager: matching and the add/list/remove/clear lifecycle
pub mod manager;
/// Price record upserts and lookups
pub mod prices;
/// Bounded cache of rendered wishlist messages for reaction removal
pub mod reaction_cache;
/// Headless-browser listing scraper
pub mod scraper;
/// Wishlist item persistence
pub mod wishlist;
