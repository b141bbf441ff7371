//! Price Discord commands - read access to scraped listing prices.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::prices,
        errors::{Error, Result},
    };

    /// Shows the last scraped price of a listing.
    #[poise::command(slash_command, prefix_command)]
    pub async fn price(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Listing title, exactly as scraped"]
        #[rest]
        name: String,
    ) -> Result<()> {
        let name = name.trim();
        let db = &ctx.data().database;

        match prices::get_price_by_name(db, name).await? {
            Some(record) => {
                ctx.say(format!(
                    "{record} (source: {}, first seen {})",
                    record.source_label,
                    record.observed_at.format("%Y-%m-%d")
                ))
                .await?;
            }
            None => {
                ctx.say(format!("No price recorded for '{name}'.")).await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
