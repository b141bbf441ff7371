//! Wishlist item entity - A user's saved intent to acquire one specific card printing.
//!
//! Rows are write-once and delete-only. The `(owner_id, card_name, set_name, card_id)`
//! tuple is unique; the index backing that is created next to the table in
//! `config::database::create_tables`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wishlist item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    /// Unique identifier, also the insertion order used when listing
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID of the owner
    pub owner_id: String,
    /// Card display name as reported by the catalog (e.g., "Charizard")
    pub card_name: String,
    /// Print set display name (e.g., "Base")
    pub set_name: String,
    /// Catalog identifier of the printing (e.g., "base1-4")
    pub card_id: String,
    /// When the item was added
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
