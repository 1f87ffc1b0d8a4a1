//! Exchange Rate Providers
//!
//! Adapters implementing the [`ExchangeRateProvider`] port:
//!
//! - [`OpenExchangeRatesClient`] - live rates from the Open Exchange Rates
//!   `latest.json` endpoint
//! - [`FixedRates`] - a hardcoded USD-based table for development and testing
//! - [`RateSource`] - picks one of the above at runtime
//!
//! Providers never return errors. Every failure is folded into
//! [`RateLookup::Unavailable`], keeping network failures distinguishable from
//! a provider that simply has no rate for the pair.
//!
//! # Example
//! ```
//! use conversions_types::{CurrencyCode, ExchangeRateProvider, RateLookup};
//! use exchange_rates::FixedRates;
//!
//! # async fn demo() {
//! let rates = FixedRates::default();
//! let usd = CurrencyCode::parse("usd").unwrap();
//! let eur = CurrencyCode::parse("EUR").unwrap();
//!
//! match rates.get_rate(&usd, &eur).await {
//!     RateLookup::Resolved(rate) => println!("1 USD = {rate} EUR"),
//!     other => println!("no rate: {other:?}"),
//! }
//! # }
//! ```

mod fixed;
mod open_exchange_rates;
mod source;

pub use conversions_types::{ExchangeRateProvider, RateLookup, RateUnavailable};
pub use fixed::FixedRates;
pub use open_exchange_rates::{DEFAULT_BASE_URL, LatestRatesResponse, OpenExchangeRatesClient};
pub use source::RateSource;
