//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod price_record;
pub mod wishlist_item;

// Re-export specific types to avoid conflicts
pub use price_record::{
    Column as PriceRecordColumn, Entity as PriceRecord, Model as PriceRecordModel,
};
pub use wishlist_item::{
    Column as WishlistItemColumn, Entity as WishlistItem, Model as WishlistItemModel,
};
