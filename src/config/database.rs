//! Database configuration module for `PokeVin`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The wishlist's four-column unique index
//! is not expressible on the entity and is created here as a separate statement.

use crate::entities::{PriceRecord, WishlistItem, wishlist_item};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pokevin.sqlite?mode=rwc";

/// Name of the unique index over `(owner_id, card_name, set_name, card_id)`.
pub const WISHLIST_UNIQUE_INDEX: &str = "idx_wishlist_items_owner_card";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// File path of a `SQLite` URL, or `None` for in-memory and non-`SQLite` URLs.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Creates the directory holding a `SQLite` database file, if it is missing.
fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(parent) = sqlite_file_path(database_url).and_then(Path::parent) else {
        return Ok(());
    };
    if !parent.as_os_str().is_empty() && !parent.exists() {
        info!("Creating database directory {}", parent.display());
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file under `data/` if no environment variable is set.
#[instrument]
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_sqlite_parent_dir(&database_url)?;
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables (and the wishlist unique index) if they do not exist yet.
///
/// Safe to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut wishlist_table = schema.create_table_from_entity(WishlistItem);
    wishlist_table.if_not_exists();
    let mut price_table = schema.create_table_from_entity(PriceRecord);
    price_table.if_not_exists();

    let wishlist_index = Index::create()
        .name(WISHLIST_UNIQUE_INDEX)
        .table(WishlistItem)
        .col(wishlist_item::Column::OwnerId)
        .col(wishlist_item::Column::CardName)
        .col(wishlist_item::Column::SetName)
        .col(wishlist_item::Column::CardId)
        .unique()
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&wishlist_table)).await?;
    db.execute(builder.build(&price_table)).await?;
    db.execute(builder.build(&wishlist_index)).await?;

    info!("Database tables are ready");
    Ok(())
}
