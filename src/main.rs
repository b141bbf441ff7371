use pokevin::{
    bot::{self, BotData},
    config::{database, settings},
    core::{catalog::PokemonTcgClient, manager::WishlistManager, reaction_cache::ReactionCache},
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Env vars can also be set externally
    dotenvy::dotenv().ok();

    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let api_key = env::var("POKEMONTCG_API_KEY").ok();
    if api_key.is_none() {
        info!("POKEMONTCG_API_KEY not set, using the catalog's anonymous rate limit");
    }
    let catalog = PokemonTcgClient::new(settings.catalog.base_url.clone(), api_key)?;

    let reactions = Arc::new(ReactionCache::new(
        settings.reactions.capacity,
        settings.reactions.ttl(),
    ));
    let wishlist = WishlistManager::new(catalog, reactions);

    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(&token, BotData::new(db, wishlist)).await
}
