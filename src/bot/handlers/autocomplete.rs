//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests the caller's stored wishlist entries in the `name, set, id` form that
//! `remove_wishlist` expects, so a slash command user never has to type one out.

use crate::{bot::BotData, errors::Error};

/// Discord's limit on autocomplete choices.
const MAX_CHOICES: usize = 25;

/// Provides autocomplete suggestions for the caller's wishlist entries.
///
/// Matches case-insensitively against the whole `name, set, id` line and returns up
/// to 25 of them in wishlist order.
pub async fn autocomplete_wishlist_entry(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();
    let owner_id = ctx.author().id.to_string();

    let Ok(items) = data.wishlist.list_wishlist(&data.database, &owner_id).await else {
        return Vec::new();
    };

    let entries = items
        .into_iter()
        .map(|item| format!("{}, {}, {}", item.card_name, item.set_name, item.card_id));
    filter_entries(entries, partial)
}

fn filter_entries(entries: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| entry.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}
