//! Scrapes listing pages and records their prices.
//!
//! Usage: `pokevin-scrape <url> [<url>...]`. Each URL gets its own browser session;
//! a failed page is logged and the run moves on to the next one.

use pokevin::{
    config::{database, settings},
    core::scraper::{self, ScrapeOutcome},
    errors::{Error, Result},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        return Err(Error::Config {
            message: "usage: pokevin-scrape <url> [<url>...]".to_string(),
        });
    }

    let settings = settings::load_default_settings()?;
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;

    let mut saved = 0;
    for url in &urls {
        match scraper::run_scrape(&db, &settings.scraper, url).await {
            ScrapeOutcome::Saved(_) => saved += 1,
            ScrapeOutcome::SkippedMissingPrice => {}
            ScrapeOutcome::Failed { reason } => warn!("Skipping {}: {}", url, reason),
        }
    }

    info!("Scraped {} of {} listings", saved, urls.len());
    Ok(())
}
