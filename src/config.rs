//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. Without it the
///   server keeps everything in memory.
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ADMIN_API_KEY` (optional): bearer key required for mutations when set
/// - `UNMATCHED_HOUSE_FILTER` (optional): `all` or `empty`, defaults to `all`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub admin_api_key: Option<String>,

    #[serde(default)]
    pub unmatched_house_filter: UnmatchedHouseFilter,
}

/// What the history endpoint returns when the `house` filter names no house.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedHouseFilter {
    /// Ignore the filter and return the unfiltered history.
    #[default]
    All,
    /// Return no transactions.
    Empty,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into the expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
