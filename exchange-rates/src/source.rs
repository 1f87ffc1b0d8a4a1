//! Runtime selection of the rate provider.

use async_trait::async_trait;
use conversions_types::{CurrencyCode, ExchangeRateProvider, RateLookup};

use crate::{FixedRates, OpenExchangeRatesClient};

/// Rate provider chosen at startup.
#[derive(Debug, Clone)]
pub enum RateSource {
    /// Live rates from Open Exchange Rates.
    Live(OpenExchangeRatesClient),
    /// Hardcoded development rates.
    Fixed(FixedRates),
}

impl RateSource {
    /// Live provider when an app id is configured, fixed rates otherwise.
    pub fn from_app_id(app_id: Option<String>, base_url: &str) -> Self {
        match app_id {
            Some(id) if !id.trim().is_empty() => {
                RateSource::Live(OpenExchangeRatesClient::with_base_url(id, base_url))
            }
            _ => RateSource::Fixed(FixedRates::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RateSource::Live(_) => "openexchangerates",
            RateSource::Fixed(_) => "fixed",
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for RateSource {
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateLookup {
        match self {
            RateSource::Live(client) => client.get_rate(from, to).await,
            RateSource::Fixed(table) => table.get_rate(from, to).await,
        }
    }
}
