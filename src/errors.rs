//! Unified error types for `PokeVin`.
//!
//! Every fallible operation in the crate returns [`Result`]. User-facing failures
//! (bad input, catalog misses) are modelled as outcome enums in `core` instead of
//! errors, so anything that ends up here is a genuine fault that fails the command.

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// The card catalog client could not be built or used
    #[error("Catalog error: {message}")]
    Catalog {
        /// What went wrong
        message: String,
    },

    /// Browser automation failed while scraping a listing
    #[error("Browser error: {message}")]
    Browser {
        /// What went wrong
        message: String,
    },

    /// Scraped price text did not parse as an amount
    #[error("Invalid price text: {text:?}")]
    InvalidPrice {
        /// The text after cleaning
        text: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl From<thirtyfour::error::WebDriverError> for Error {
    fn from(value: thirtyfour::error::WebDriverError) -> Self {
        Self::Browser {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
