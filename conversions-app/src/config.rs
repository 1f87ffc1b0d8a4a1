//! Configuration loading from environment.

use std::env;

use exchange_rates::DEFAULT_BASE_URL;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Open Exchange Rates app id; `None` selects the fixed development rates.
    pub rates_app_id: Option<String>,
    pub rates_base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let rates_app_id = lookup("OPENEXCHANGERATES_APP_ID").filter(|id| !id.trim().is_empty());

        let rates_base_url =
            lookup("OPENEXCHANGERATES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            port,
            database_url,
            rates_app_id,
            rates_base_url,
        })
    }
}
