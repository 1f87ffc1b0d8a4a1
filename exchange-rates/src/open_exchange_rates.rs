//! Open Exchange Rates HTTP client.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use conversions_types::{CurrencyCode, ExchangeRateProvider, RateLookup, RateUnavailable};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org/api";

/// Payload of `GET /latest.json`.
///
/// Only `rates` is used; the metadata is kept for logging and debugging.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRatesResponse {
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub base: String,
    pub rates: HashMap<String, Decimal>,
}

impl LatestRatesResponse {
    /// Looks up the rate published for `symbol`.
    ///
    /// Keyed by the requested code, so extra entries in the mapping are ignored.
    pub fn rate_for(&self, symbol: &CurrencyCode) -> RateLookup {
        let quote = self
            .rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(symbol.as_str()))
            .map(|(_, rate)| *rate);
        RateLookup::from_quote(quote)
    }
}

/// Client for the Open Exchange Rates API.
#[derive(Clone)]
pub struct OpenExchangeRatesClient {
    base_url: String,
    app_id: String,
    http: Client,
}

impl OpenExchangeRatesClient {
    /// Creates a client against the public API.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::with_base_url(app_id, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (proxies, test servers).
    pub fn with_base_url(app_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        symbol: &CurrencyCode,
    ) -> Result<LatestRatesResponse, reqwest::Error> {
        self.http
            .get(format!("{}/latest.json", self.base_url))
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("base", base.as_str()),
                ("symbols", symbol.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<LatestRatesResponse>()
            .await
    }
}

impl fmt::Debug for OpenExchangeRatesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenExchangeRatesClient")
            .field("base_url", &self.base_url)
            .field("app_id", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ExchangeRateProvider for OpenExchangeRatesClient {
    #[tracing::instrument(skip_all, fields(from = %from, to = %to))]
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateLookup {
        if from == to {
            return RateLookup::SameCurrency;
        }

        tracing::info!("Getting exchange rate from {} to {}", from, to);

        match self.fetch_latest(from, to).await {
            Ok(response) => {
                let lookup = response.rate_for(to);
                match &lookup {
                    RateLookup::Resolved(rate) => {
                        tracing::info!(
                            timestamp = response.timestamp,
                            "Exchange rate received: {} to {} = {}",
                            from,
                            to,
                            rate
                        );
                    }
                    _ => tracing::warn!("Provider published no rate for {} to {}", from, to),
                }
                lookup
            }
            Err(e) => {
                tracing::error!(error = %e, "Exchange rate request failed");
                RateLookup::Unavailable(RateUnavailable::NetworkFailure(e.to_string()))
            }
        }
    }
}
