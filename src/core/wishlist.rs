//! Wishlist persistence - Exact-tuple storage operations on wishlist items.
//!
//! Items are identified by the `(owner_id, card_name, set_name, card_id)` tuple, which
//! is unique in the table. There is no update path: items are inserted once and
//! deleted either one at a time or in bulk per owner.

use crate::{
    entities::{WishlistItem, wishlist_item},
    errors::Result,
};
use sea_orm::{Condition, QueryOrder, Set, SqlErr, prelude::*};
use std::fmt;

/// The identity of one wishlist item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WishlistKey {
    /// Discord user ID of the owner
    pub owner_id: String,
    /// Card display name
    pub card_name: String,
    /// Print set display name
    pub set_name: String,
    /// Catalog id of the printing
    pub card_id: String,
}

impl WishlistKey {
    /// Builds a key from its four parts.
    pub fn new(
        owner_id: impl Into<String>,
        card_name: impl Into<String>,
        set_name: impl Into<String>,
        card_id: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            card_name: card_name.into(),
            set_name: set_name.into(),
            card_id: card_id.into(),
        }
    }

    fn filter(&self) -> Condition {
        Condition::all()
            .add(wishlist_item::Column::OwnerId.eq(self.owner_id.as_str()))
            .add(wishlist_item::Column::CardName.eq(self.card_name.as_str()))
            .add(wishlist_item::Column::SetName.eq(self.set_name.as_str()))
            .add(wishlist_item::Column::CardId.eq(self.card_id.as_str()))
    }
}

impl From<&wishlist_item::Model> for WishlistKey {
    fn from(item: &wishlist_item::Model) -> Self {
        Self::new(
            item.owner_id.clone(),
            item.card_name.clone(),
            item.set_name.clone(),
            item.card_id.clone(),
        )
    }
}

impl fmt::Display for WishlistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Set: {}, ID: {})",
            self.card_name, self.set_name, self.card_id
        )
    }
}

/// Result of [`add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddItemResult {
    /// A new row was written
    Inserted(wishlist_item::Model),
    /// The exact tuple was already stored for this owner
    AlreadyPresent,
}

/// Checks whether the exact tuple is stored.
pub async fn item_exists(db: &DatabaseConnection, key: &WishlistKey) -> Result<bool> {
    let count = WishlistItem::find().filter(key.filter()).count(db).await?;
    Ok(count > 0)
}

/// Inserts a wishlist item.
///
/// A unique-constraint violation (a concurrent add of the same tuple won the race)
/// is reported as [`AddItemResult::AlreadyPresent`] rather than an error.
pub async fn add_item(db: &DatabaseConnection, key: &WishlistKey) -> Result<AddItemResult> {
    let item = wishlist_item::ActiveModel {
        owner_id: Set(key.owner_id.clone()),
        card_name: Set(key.card_name.clone()),
        set_name: Set(key.set_name.clone()),
        card_id: Set(key.card_id.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match item.insert(db).await {
        Ok(model) => Ok(AddItemResult::Inserted(model)),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!("Duplicate wishlist insert for {}: {}", key, e);
            Ok(AddItemResult::AlreadyPresent)
        }
        Err(e) => Err(e.into()),
    }
}

/// All items belonging to `owner_id`, oldest first.
pub async fn get_items_for_owner(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<wishlist_item::Model>> {
    WishlistItem::find()
        .filter(wishlist_item::Column::OwnerId.eq(owner_id))
        .order_by_asc(wishlist_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of items belonging to `owner_id`.
pub async fn count_for_owner(db: &DatabaseConnection, owner_id: &str) -> Result<u64> {
    WishlistItem::find()
        .filter(wishlist_item::Column::OwnerId.eq(owner_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Deletes the exact tuple. Returns `true` if a row was removed.
pub async fn remove_item(db: &DatabaseConnection, key: &WishlistKey) -> Result<bool> {
    let result = WishlistItem::delete_many()
        .filter(key.filter())
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Deletes every item belonging to `owner_id`. Returns how many rows went away.
pub async fn clear_for_owner(db: &DatabaseConnection, owner_id: &str) -> Result<u64> {
    let result = WishlistItem::delete_many()
        .filter(wishlist_item::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_item_and_exists() -> Result<()> {
        let db = setup_test_db().await?;
        let key = charizard_key("user1");

        assert!(!item_exists(&db, &key).await?);

        let result = add_item(&db, &key).await?;
        let AddItemResult::Inserted(model) = result else {
            panic!("expected an insert");
        };
        assert_eq!(model.owner_id, "user1");
        assert_eq!(model.card_id, "base1-4");

        assert!(item_exists(&db, &key).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_exists_requires_all_four_fields() -> Result<()> {
        let db = setup_test_db().await?;
        add_item(&db, &charizard_key("user1")).await?;

        let other_owner = charizard_key("user2");
        let other_set = WishlistKey::new("user1", "Charizard", "Base Set 2", "base1-4");
        let other_case = WishlistKey::new("user1", "charizard", "Base", "base1-4");

        assert!(!item_exists(&db, &other_owner).await?);
        assert!(!item_exists(&db, &other_set).await?);
        assert!(!item_exists(&db, &other_case).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_already_present() -> Result<()> {
        let db = setup_test_db().await?;
        let key = charizard_key("user1");

        add_item(&db, &key).await?;
        let second = add_item(&db, &key).await?;

        assert_eq!(second, AddItemResult::AlreadyPresent);
        assert_eq!(count_for_owner(&db, "user1").await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_items_preserves_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;
        add_item(&db, &WishlistKey::new("user1", "Pikachu", "Jungle", "base2-60")).await?;
        add_item(&db, &charizard_key("user1")).await?;
        add_item(&db, &WishlistKey::new("user2", "Mew", "Promo", "basep-8")).await?;

        let items = get_items_for_owner(&db, "user1").await?;
        let names: Vec<_> = items.iter().map(|i| i.card_name.as_str()).collect();
        assert_eq!(names, ["Pikachu", "Charizard"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item() -> Result<()> {
        let db = setup_test_db().await?;
        let key = charizard_key("user1");
        add_item(&db, &key).await?;
        add_item(&db, &WishlistKey::new("user1", "Pikachu", "Jungle", "base2-60")).await?;

        assert!(remove_item(&db, &key).await?);
        assert_eq!(count_for_owner(&db, "user1").await?, 1);

        // Removing again finds nothing and leaves the other row alone
        assert!(!remove_item(&db, &key).await?);
        assert_eq!(count_for_owner(&db, "user1").await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_for_owner_only_touches_owner() -> Result<()> {
        let db = setup_test_db().await?;
        add_item(&db, &charizard_key("user1")).await?;
        add_item(&db, &WishlistKey::new("user1", "Pikachu", "Jungle", "base2-60")).await?;
        add_item(&db, &charizard_key("user2")).await?;

        assert_eq!(clear_for_owner(&db, "user1").await?, 2);
        assert_eq!(count_for_owner(&db, "user1").await?, 0);
        assert_eq!(count_for_owner(&db, "user2").await?, 1);

        // Clearing an empty wishlist is fine
        assert_eq!(clear_for_owner(&db, "user1").await?, 0);
        Ok(())
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            charizard_key("user1").to_string(),
            "Charizard (Set: Base, ID: base1-4)"
        );
    }
}
