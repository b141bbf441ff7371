/// Database configuration and connection management
pub mod database;

/// Tunable settings loaded from config.toml
pub mod settings;
