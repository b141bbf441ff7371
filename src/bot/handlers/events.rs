//! Gateway event dispatch for events that are not commands.

use super::reactions;
use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Routes gateway events to their handlers.
///
/// # Errors
/// Returns an error if a handler fails; poise reports it through `on_error`.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot is online as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            reactions::handle_reaction_add(ctx, add_reaction, framework.bot_id, data).await?;
        }
        _ => {}
    }
    Ok(())
}
