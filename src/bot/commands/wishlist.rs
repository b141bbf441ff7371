//! Wishlist Discord commands - add, remove, list, and clear.
//!
//! The commands parse nothing themselves: the raw argument text goes to
//! `core::manager::WishlistManager`, and the outcome is rendered by `bot::replies`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, replies},
        core::manager::AddOutcome,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::warn;

    /// Adds a card to your wishlist.
    ///
    /// Use `name, set, id` to add an exact printing, or just a name to get a suggestion.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_wishlist(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Card name, or `name, set, id` (e.g. Charizard, Base, base1-4)"]
        #[rest]
        card_info: String,
    ) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let data = ctx.data();

        let outcome = data
            .wishlist
            .add_to_wishlist(&data.database, &owner_id, &card_info)
            .await?;

        match &outcome {
            AddOutcome::Suggestion(card) => {
                let embed = replies::suggestion_embed(card);
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            _ => {
                ctx.say(replies::add_outcome_text(&outcome)).await?;
            }
        }
        Ok(())
    }

    /// Removes an exact card (`name, set, id`) from your wishlist.
    #[poise::command(slash_command, prefix_command)]
    pub async fn remove_wishlist(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The card as `name, set, id`"]
        #[autocomplete = "autocomplete::autocomplete_wishlist_entry"]
        #[rest]
        card_info: String,
    ) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let data = ctx.data();

        let outcome = data
            .wishlist
            .remove_from_wishlist(&data.database, &owner_id, &card_info)
            .await?;

        ctx.say(replies::remove_outcome_text(&outcome)).await?;
        Ok(())
    }

    /// Shows your wishlist, one message per card.
    ///
    /// React to a card's message with the removal emoji to remove it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn wishlist(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let data = ctx.data();

        let items = data
            .wishlist
            .list_wishlist(&data.database, &owner_id)
            .await?;

        if items.is_empty() {
            ctx.say("Your wishlist is currently empty.").await?;
            return Ok(());
        }

        ctx.say(replies::wishlist_header(items.len())).await?;

        for item in &items {
            let message = ctx
                .channel_id()
                .send_message(
                    ctx,
                    serenity::CreateMessage::new().embed(replies::item_embed(item)),
                )
                .await?;

            // Tracked before reacting so an early owner reaction is not lost
            data.wishlist.track_rendered(message.id.get(), item).await;

            let reaction = serenity::ReactionType::Unicode(replies::REMOVE_EMOJI.to_string());
            if let Err(e) = message.react(ctx, reaction).await {
                // Without the reaction the user can still add it by hand
                warn!("Failed to add removal reaction to {}: {}", message.id, e);
            }
        }
        Ok(())
    }

    /// Removes every card from your wishlist.
    #[poise::command(slash_command, prefix_command)]
    pub async fn clear_wishlist(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let owner_id = ctx.author().id.to_string();
        let data = ctx.data();

        data.wishlist
            .clear_wishlist(&data.database, &owner_id)
            .await?;

        ctx.say("Your wishlist has been cleared.").await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
