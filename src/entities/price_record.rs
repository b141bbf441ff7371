//! Price record entity - The latest observed price for a listing, keyed by item name.
//!
//! Records are upserted by the listing scraper and never deleted. `observed_at` is set
//! when the record is first created and is left alone by later upserts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Listing title, unique across records
    #[sea_orm(unique)]
    pub item_name: String,
    /// Price with two fractional digits
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    /// Where the price came from (e.g., "eBay")
    pub source_label: String,
    /// When the record was first created
    pub observed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${}", self.item_name, self.amount)
    }
}
