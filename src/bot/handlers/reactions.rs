//! Reaction-based removal of rendered wishlist items.

use crate::{
    bot::{BotData, replies},
    core::manager::ReactionOutcome,
    errors::Result,
};
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::{debug, warn};

/// How long warning replies stay in the channel.
const WARNING_LIFETIME: Duration = Duration::from_secs(5);

/// Handles a reaction added anywhere the bot can see.
///
/// Only the removal emoji on a tracked wishlist message does anything. The bot's own
/// reactions (the one it adds when rendering) are skipped.
///
/// # Errors
/// Returns an error if the storage delete or the message edit fails.
pub async fn handle_reaction_add(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    bot_id: serenity::UserId,
    data: &BotData,
) -> Result<()> {
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };
    if user_id == bot_id || !reaction.emoji.unicode_eq(replies::REMOVE_EMOJI) {
        return Ok(());
    }

    let outcome = data
        .wishlist
        .remove_by_reaction(&data.database, reaction.message_id.get(), &user_id.to_string())
        .await?;

    match &outcome {
        ReactionOutcome::Untracked => {
            debug!("Ignoring reaction on untracked message {}", reaction.message_id);
        }
        ReactionOutcome::Removed(key) => {
            reaction
                .channel_id
                .edit_message(
                    ctx,
                    reaction.message_id,
                    serenity::EditMessage::new().embed(replies::removed_embed(key)),
                )
                .await?;
        }
        ReactionOutcome::NotOwner(_) | ReactionOutcome::NotFound(_) => {
            if let Some(text) = warning_text(&outcome, user_id) {
                send_transient(ctx, reaction.channel_id, text).await;
            }
        }
    }
    Ok(())
}

fn warning_text(outcome: &ReactionOutcome, user_id: serenity::UserId) -> Option<String> {
    match outcome {
        ReactionOutcome::NotOwner(_) => Some(format!(
            "<@{user_id}>, you can only remove cards from your own wishlist."
        )),
        ReactionOutcome::NotFound(key) => Some(format!(
            "<@{user_id}>, {key} is no longer in your wishlist."
        )),
        ReactionOutcome::Untracked | ReactionOutcome::Removed(_) => None,
    }
}

/// Sends `text` to `channel_id` and deletes it after [`WARNING_LIFETIME`].
async fn send_transient(ctx: &serenity::Context, channel_id: serenity::ChannelId, text: String) {
    let message = match channel_id.say(ctx, text).await {
        Ok(message) => message,
        Err(e) => {
            warn!("Failed to send warning to channel {}: {}", channel_id, e);
            return;
        }
    };

    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(WARNING_LIFETIME).await;
        if let Err(e) = channel_id.delete_message(&http, message.id).await {
            debug!("Failed to delete warning {}: {}", message.id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_warning_text_mentions_reactor() {
        let user_id = serenity::UserId::new(42);

        let not_owner = warning_text(&ReactionOutcome::NotOwner(charizard_key("7")), user_id);
        assert_eq!(
            not_owner.as_deref(),
            Some("<@42>, you can only remove cards from your own wishlist.")
        );

        let not_found = warning_text(&ReactionOutcome::NotFound(charizard_key("42")), user_id);
        assert!(not_found.unwrap_or_default().contains("no longer in your wishlist"));
    }

    #[test]
    fn test_no_warning_for_untracked_or_removed() {
        let user_id = serenity::UserId::new(42);
        assert!(warning_text(&ReactionOutcome::Untracked, user_id).is_none());
        assert!(warning_text(&ReactionOutcome::Removed(charizard_key("42")), user_id).is_none());
    }
}
