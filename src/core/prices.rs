//! Price record business logic - Upserts and lookups keyed by item name.

use crate::{
    entities::{PriceRecord, price_record},
    errors::{Error, Result},
};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// Fractional digits kept for every amount.
const AMOUNT_SCALE: u32 = 2;

/// Exclusive upper bound of a `Decimal(10, 2)` column: eight integer digits.
const AMOUNT_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

fn round_to_cents(amount: Decimal) -> Decimal {
    let mut amount =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(AMOUNT_SCALE);
    amount
}

/// `SQLite` hands decimals back as floats, which drops trailing zeros.
fn with_cents(mut record: price_record::Model) -> price_record::Model {
    record.amount = round_to_cents(record.amount);
    record
}

/// Inserts a price record, or overwrites `amount` and `source_label` of the record
/// with the same `item_name`. `observed_at` keeps its original value on overwrite.
///
/// The amount is rounded to cents before it is stored.
///
/// # Errors
/// Returns an error if the amount is negative, does not fit `Decimal(10, 2)`, or the
/// database write fails.
pub async fn upsert_price(
    db: &DatabaseConnection,
    item_name: &str,
    amount: Decimal,
    source_label: &str,
) -> Result<price_record::Model> {
    let amount = round_to_cents(amount);
    if (amount.is_sign_negative() && !amount.is_zero()) || amount >= AMOUNT_LIMIT {
        return Err(Error::InvalidPrice {
            text: amount.to_string(),
        });
    }

    let record = price_record::ActiveModel {
        item_name: Set(item_name.to_string()),
        amount: Set(amount),
        source_label: Set(source_label.to_string()),
        observed_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    PriceRecord::insert(record)
        .on_conflict(
            OnConflict::column(price_record::Column::ItemName)
                .update_columns([
                    price_record::Column::Amount,
                    price_record::Column::SourceLabel,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    get_price_by_name(db, item_name)
        .await?
        .ok_or_else(|| Error::Database(format!("price record '{item_name}' missing after upsert")))
}

/// Finds the price record for `item_name`.
pub async fn get_price_by_name(
    db: &DatabaseConnection,
    item_name: &str,
) -> Result<Option<price_record::Model>> {
    PriceRecord::find()
        .filter(price_record::Column::ItemName.eq(item_name))
        .one(db)
        .await
        .map(|record| record.map(with_cents))
        .map_err(Into::into)
}

/// All price records, ordered alphabetically by item name.
pub async fn get_all_prices(db: &DatabaseConnection) -> Result<Vec<price_record::Model>> {
    PriceRecord::find()
        .order_by_asc(price_record::Column::ItemName)
        .all(db)
        .await
        .map(|records| records.into_iter().map(with_cents).collect())
        .map_err(Into::into)
}
