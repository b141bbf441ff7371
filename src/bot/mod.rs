//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `PokeVin`: the command table, the
//! event handler for reactions, reply formatting, and the shared bot context.

/// Discord command implementations (wishlist, prices, general)
pub mod commands;
/// Discord event and interaction handlers (reactions, autocomplete)
pub mod handlers;
/// Reply text and embeds for command outcomes
pub mod replies;

use crate::{
    core::{catalog::PokemonTcgClient, manager::WishlistManager},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Prefix for text commands, e.g. `!wishlist`.
pub const COMMAND_PREFIX: &str = "!";

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Card matching and wishlist lifecycle, including the reaction cache
    pub wishlist: WishlistManager<PokemonTcgClient>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        wishlist: WishlistManager<PokemonTcgClient>,
    ) -> Self {
        Self { database, wishlist }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("An error occurred, please try again later.").await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::ArgumentParse { ctx, .. } => {
            let reply = format!(
                "Invalid arguments for `{COMMAND_PREFIX}{}`. Use `{COMMAND_PREFIX}commands` to see usage.",
                ctx.command().name
            );
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send usage message: {}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error handling event {}: {:?}", event.snake_case_name(), error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the framework and runs the bot until the gateway connection ends.
///
/// # Errors
/// Returns an error if the client cannot be created or the connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::add_wishlist(),
                commands::remove_wishlist(),
                commands::wishlist(),
                commands::clear_wishlist(),
                commands::price(),
                commands::help(),
                commands::ping(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
