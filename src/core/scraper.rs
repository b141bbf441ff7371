//! Listing scraper - Reads one listing page in a headless browser and upserts its price.
//!
//! A scrape is a single linear attempt: navigate, wait for the title, read title and
//! price, clean the price, write. Any failure along the way ends the job without a
//! write, and the browser session is closed on every path. There is no retry.

use crate::{
    config::settings::ScraperSettings,
    core::prices,
    entities::price_record,
    errors::{Error, Result},
};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use thirtyfour::{ChromiumLikeCapabilities, prelude::*};
use tracing::{debug, error, info, instrument, warn};

#[allow(clippy::unwrap_used)] // constant pattern
static NON_PRICE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Why a price text could not be turned into an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// Nothing was left after removing non-numeric characters
    Empty,
    /// What was left is not a number (e.g. `1.2.3`)
    Invalid(String),
}

/// Strips everything but ASCII digits and `.` and parses the rest as an amount with
/// two decimal places.
///
/// `"US $1,234.50/ea"` becomes `1234.50`. A leading minus sign is stripped like any
/// other symbol, so the result is never negative.
///
/// # Errors
/// Returns [`PriceParseError`] when no number remains after cleaning.
pub fn clean_price_text(text: &str) -> std::result::Result<Decimal, PriceParseError> {
    let cleaned = NON_PRICE_CHARS.replace_all(text, "");
    if cleaned.is_empty() {
        return Err(PriceParseError::Empty);
    }
    Decimal::from_str(&cleaned)
        .map(|amount| amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .map_err(|_| PriceParseError::Invalid(cleaned.into_owned()))
}

/// The browser operations a scrape needs.
pub trait ListingSession: Send {
    /// Navigates to `url`.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<()>> + Send;

    /// Waits until an element matching `selector` is present, up to `timeout`.
    fn wait_for(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Visible text of the first element matching `selector`.
    fn inner_text(&mut self, selector: &str) -> impl Future<Output = Result<String>> + Send;

    /// Ends the session and releases the browser.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// A headless Chrome session driven over WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Starts a fresh headless browser through the WebDriver server at `webdriver_url`.
    ///
    /// # Errors
    /// Returns an error if the capabilities are rejected or the server is unreachable.
    pub async fn launch(webdriver_url: &str) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_no_sandbox()?;
        caps.set_disable_gpu()?;

        let driver = WebDriver::new(webdriver_url, caps).await?;
        debug!("Browser session started via {}", webdriver_url);
        Ok(Self { driver })
    }
}

impl ListingSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.driver
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await?;
        Ok(())
    }

    async fn inner_text(&mut self, selector: &str) -> Result<String> {
        let element = self.driver.find(By::Css(selector)).await?;
        Ok(element.text().await?)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// Result of one scrape job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The listing's price was written
    Saved(price_record::Model),
    /// The price element was present but empty; nothing was written
    SkippedMissingPrice,
    /// Some step failed; nothing was written
    Failed {
        /// The error that ended the job
        reason: String,
    },
}

/// Scrapes `url` with an already-open `session`, then closes it.
///
/// Never returns an error: failures are logged and reported as
/// [`ScrapeOutcome::Failed`].
#[instrument(skip(session, db, settings))]
pub async fn scrape_and_upsert<S: ListingSession>(
    mut session: S,
    db: &DatabaseConnection,
    url: &str,
    settings: &ScraperSettings,
) -> ScrapeOutcome {
    let result = extract_and_save(&mut session, db, url, settings).await;

    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    match result {
        Ok(Some(record)) => {
            info!("Saved to DB: {}", record);
            ScrapeOutcome::Saved(record)
        }
        Ok(None) => {
            warn!("Price not found on {}, skipping", url);
            ScrapeOutcome::SkippedMissingPrice
        }
        Err(e) => {
            error!("Error scraping {}: {}", url, e);
            ScrapeOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn extract_and_save<S: ListingSession>(
    session: &mut S,
    db: &DatabaseConnection,
    url: &str,
    settings: &ScraperSettings,
) -> Result<Option<price_record::Model>> {
    session.goto(url).await?;
    session
        .wait_for(&settings.title_selector, settings.wait_timeout())
        .await?;

    let name = session
        .inner_text(&settings.title_selector)
        .await?
        .trim()
        .to_string();
    if name.is_empty() {
        return Err(Error::Browser {
            message: "listing title is empty".to_string(),
        });
    }

    let price_text = session.inner_text(&settings.price_selector).await?;
    debug!("Raw price text: {:?}", price_text);
    if price_text.trim().is_empty() {
        return Ok(None);
    }

    let amount = clean_price_text(&price_text).map_err(|e| Error::InvalidPrice {
        text: match e {
            PriceParseError::Empty => price_text.clone(),
            PriceParseError::Invalid(cleaned) => cleaned,
        },
    })?;
    debug!("Cleaned price: {}", amount);

    let record = prices::upsert_price(db, &name, amount, &settings.source_label).await?;
    Ok(Some(record))
}

/// Launches a browser session and scrapes `url` with it.
pub async fn run_scrape(
    db: &DatabaseConnection,
    settings: &ScraperSettings,
    url: &str,
) -> ScrapeOutcome {
    match WebDriverSession::launch(&settings.webdriver_url).await {
        Ok(session) => scrape_and_upsert(session, db, url, settings).await,
        Err(e) => {
            error!("Could not start browser for {}: {}", url, e);
            ScrapeOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    const URL: &str = "https://www.ebay.com/itm/1234567890";

    #[test]
    fn test_clean_price_text() {
        assert_eq!(clean_price_text("US $123.45/ea"), Ok(Decimal::new(12345, 2)));
        assert_eq!(clean_price_text("$1,234.50"), Ok(Decimal::new(123_450, 2)));
        assert_eq!(clean_price_text(" 7 "), Ok(Decimal::new(7, 0)));
        assert_eq!(clean_price_text("-5.00"), Ok(Decimal::new(500, 2)));
        assert_eq!(clean_price_text("9.999"), Ok(Decimal::new(1000, 2)));
    }

    #[test]
    fn test_clean_price_text_drops_non_ascii_digits() {
        assert_eq!(
            clean_price_text("US $１２３ 45.00"),
            Ok(Decimal::new(4500, 2))
        );
        assert_eq!(clean_price_text("٣ 12.50"), Ok(Decimal::new(1250, 2)));
        assert_eq!(clean_price_text("１２３"), Err(PriceParseError::Empty));
    }

    #[test]
    fn test_clean_price_text_failures() {
        assert_eq!(clean_price_text(""), Err(PriceParseError::Empty));
        assert_eq!(clean_price_text("Free"), Err(PriceParseError::Empty));
        assert_eq!(
            clean_price_text("1.2.3"),
            Err(PriceParseError::Invalid("1.2.3".to_string()))
        );
    }

    #[tokio::test]
    async fn test_scrape_saves_record() -> Result<()> {
        let db = setup_test_db().await?;
        let session = FakeSession::with_listing("  Charizard Base Set Holo  ", "US $123.45/ea");
        let closed = Arc::clone(&session.closed);

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        let ScrapeOutcome::Saved(record) = outcome else {
            panic!("expected Saved");
        };
        assert_eq!(record.item_name, "Charizard Base Set Holo");
        assert_eq!(record.amount, Decimal::new(12345, 2));
        assert_eq!(record.source_label, "eBay");
        assert!(closed.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_empty_price_skips_write() -> Result<()> {
        let db = setup_test_db().await?;
        let session = FakeSession::with_listing("Charizard", "");
        let closed = Arc::clone(&session.closed);

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        assert_eq!(outcome, ScrapeOutcome::SkippedMissingPrice);
        assert!(prices::get_all_prices(&db).await?.is_empty());
        assert!(closed.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_missing_price_element_fails_without_write() -> Result<()> {
        let db = setup_test_db().await?;
        let mut session = FakeSession::with_listing("Charizard", "1.00");
        session
            .texts
            .remove(&ScraperSettings::default().price_selector);
        let closed = Arc::clone(&session.closed);

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        assert!(matches!(outcome, ScrapeOutcome::Failed { .. }));
        assert!(prices::get_all_prices(&db).await?.is_empty());
        assert!(closed.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_title_timeout_fails_without_write() -> Result<()> {
        let db = setup_test_db().await?;
        let session = FakeSession::default();
        let closed = Arc::clone(&session.closed);

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        assert!(matches!(outcome, ScrapeOutcome::Failed { .. }));
        assert!(prices::get_all_prices(&db).await?.is_empty());
        assert!(closed.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_navigation_failure_closes_session() -> Result<()> {
        let db = setup_test_db().await?;
        let mut session = FakeSession::with_listing("Charizard", "1.00");
        session.fail_navigation = true;
        let closed = Arc::clone(&session.closed);

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        assert!(matches!(outcome, ScrapeOutcome::Failed { .. }));
        assert!(closed.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_unparseable_price_fails_without_write() -> Result<()> {
        let db = setup_test_db().await?;
        let session = FakeSession::with_listing("Charizard", "Best offer");

        let outcome =
            scrape_and_upsert(session, &db, URL, &ScraperSettings::default()).await;

        assert!(matches!(outcome, ScrapeOutcome::Failed { .. }));
        assert!(prices::get_all_prices(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_scrape_twice_overwrites_amount() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = ScraperSettings::default();

        scrape_and_upsert(FakeSession::with_listing("Charizard", "$100.00"), &db, URL, &settings)
            .await;
        scrape_and_upsert(FakeSession::with_listing("Charizard", "$89.99"), &db, URL, &settings)
            .await;

        let all = prices::get_all_prices(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, Decimal::new(8999, 2));
        Ok(())
    }
}
