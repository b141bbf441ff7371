//! Discord interaction handlers
//!
//! This module provides handlers for gateway events (reactions, readiness) and
//! for slash command autocomplete.

/// Autocomplete handlers for wishlist entries
pub mod autocomplete;
/// Gateway event dispatch
pub mod events;
/// Reaction-based removal of rendered wishlist items
pub mod reactions;
