//! Reply formatting for wishlist and price commands.
//!
//! Text builders are plain functions so the wording can be tested without Discord.

use crate::{
    bot::COMMAND_PREFIX,
    core::{
        catalog::{Card, CardSet},
        manager::{AddOutcome, RemoveOutcome},
        wishlist::WishlistKey,
    },
    entities::wishlist_item,
};
use poise::serenity_prelude as serenity;

/// Reaction that removes a rendered wishlist item.
pub const REMOVE_EMOJI: &str = "✅";

const EMBED_COLOR: u32 = 0x00FF_CB05;
const REMOVED_COLOR: u32 = 0x0099_AAB5;

/// Usage line for `add_wishlist`.
#[must_use]
pub fn add_usage() -> String {
    format!(
        "Invalid format! Please use the format: `{COMMAND_PREFIX}add_wishlist <pokemon_name>, <set_name>, <id>`."
    )
}

/// Usage line for `remove_wishlist`.
#[must_use]
pub fn remove_usage() -> String {
    format!(
        "Invalid format! Please use the format: `{COMMAND_PREFIX}remove_wishlist <pokemon_name>, <set_name>, <id>`."
    )
}

/// A copy-pasteable `add_wishlist` line for `card`.
#[must_use]
pub fn suggestion(card: &Card) -> String {
    format!(
        "Did you mean this one? Add it with:\n`{COMMAND_PREFIX}add_wishlist {}, {}, {}`",
        card.name, card.set.name, card.id
    )
}

/// Set name, with its series when the series is named differently.
#[must_use]
pub fn set_label(set: &CardSet) -> String {
    match &set.series {
        Some(series) if *series != set.name => format!("{} ({series})", set.name),
        _ => set.name.clone(),
    }
}

/// Embed for a name-only `add_wishlist` suggestion.
#[must_use]
pub fn suggestion_embed(card: &Card) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&card.name)
        .color(EMBED_COLOR)
        .description(suggestion(card))
        .field("Set", set_label(&card.set), true)
        .field("ID", &card.id, true);
    if let Some(rarity) = &card.rarity {
        embed = embed.field("Rarity", rarity, true);
    }
    if let Some(url) = card.image_url() {
        embed = embed.thumbnail(url);
    }
    embed
}

/// Reply text for an `add_wishlist` outcome.
#[must_use]
pub fn add_outcome_text(outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::InvalidFormat => add_usage(),
        AddOutcome::Suggestion(card) => suggestion(card),
        AddOutcome::NoCardsFound { query } => {
            format!("No cards found matching '{query}'. Please try again with a valid name.")
        }
        AddOutcome::NoMatch(tuple) => format!(
            "No card found matching '{}' (Set: {}, ID: {}). Please try again with the correct details.",
            tuple.card_name, tuple.set_name, tuple.card_id
        ),
        AddOutcome::AlreadyPresent(key) => format!("{key} is already in your wishlist!"),
        AddOutcome::Added { item, image_url } => {
            let key = WishlistKey::from(item);
            match image_url {
                Some(url) => format!("{key} has been added to your wishlist!\n{url}"),
                None => format!("{key} has been added to your wishlist!"),
            }
        }
    }
}

/// Reply text for a `remove_wishlist` outcome.
#[must_use]
pub fn remove_outcome_text(outcome: &RemoveOutcome) -> String {
    match outcome {
        RemoveOutcome::InvalidFormat => remove_usage(),
        RemoveOutcome::Removed(key) => format!("{key} has been removed from your wishlist."),
        RemoveOutcome::NotFound(key) => format!("{key} was not found in your wishlist."),
    }
}

/// Header sent before a non-empty wishlist.
#[must_use]
pub fn wishlist_header(count: usize) -> String {
    format!("Your wishlist ({count} cards). React with {REMOVE_EMOJI} on a card to remove it:")
}

/// One wishlist item as an embed.
#[must_use]
pub fn item_embed(item: &wishlist_item::Model) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(&item.card_name)
        .color(EMBED_COLOR)
        .field("Set", &item.set_name, true)
        .field("ID", &item.card_id, true)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Added {}",
            item.created_at.format("%Y-%m-%d")
        )))
}

/// Replacement embed for an item removed by reaction.
#[must_use]
pub fn removed_embed(key: &WishlistKey) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("~~{}~~", key.card_name))
        .color(REMOVED_COLOR)
        .description(format!("{key} has been removed from your wishlist."))
}

/// Help text listing every command.
#[must_use]
pub fn help_text() -> String {
    let p = COMMAND_PREFIX;
    format!(
        "**PokeVin Commands**\n\
        • `{p}add_wishlist <pokemon_name>` - Suggests a printing of that card.\n\
        • `{p}add_wishlist <pokemon_name>, <set_name>, <id>` - Adds that exact card to your wishlist.\n\
        • `{p}remove_wishlist <pokemon_name>, <set_name>, <id>` - Removes a card from your wishlist.\n\
        • `{p}wishlist` - Shows your wishlist. React with {REMOVE_EMOJI} on a card to remove it.\n\
        • `{p}clear_wishlist` - Removes every card from your wishlist.\n\
        • `{p}price <listing title>` - Shows the last scraped price of a listing.\n\
        • `{p}ping` - Checks if the bot is responsive.\n\
        • `{p}commands` - Shows this help message."
    )
}
