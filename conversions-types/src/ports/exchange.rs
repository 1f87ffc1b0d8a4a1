//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, fixed tables, mocks, etc.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::CurrencyCode;

/// Why no usable rate could be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateUnavailable {
    /// The provider could not be reached or answered with something unreadable.
    NetworkFailure(String),
    /// The provider answered but published no positive rate for the pair.
    EmptyRate,
}

impl std::fmt::Display for RateUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateUnavailable::NetworkFailure(reason) => write!(f, "provider failure: {}", reason),
            RateUnavailable::EmptyRate => write!(f, "no rate published"),
        }
    }
}

/// Outcome of a rate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLookup {
    /// A strictly positive rate: units of `to` per unit of `from`.
    Resolved(Decimal),
    /// Source and target are the same currency; nothing was looked up.
    SameCurrency,
    /// No rate could be obtained.
    Unavailable(RateUnavailable),
}

impl RateLookup {
    /// Classifies a rate quoted by a provider.
    ///
    /// A missing, zero, or negative quote is not a usable rate.
    pub fn from_quote(quote: Option<Decimal>) -> Self {
        match quote {
            Some(rate) if rate > Decimal::ZERO => RateLookup::Resolved(rate),
            _ => RateLookup::Unavailable(RateUnavailable::EmptyRate),
        }
    }
}

/// Port trait for exchange rate providers.
///
/// Lookups never fail with an error: every provider problem is folded into
/// [`RateLookup::Unavailable`].
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Gets the rate to convert one unit of `from` into `to`.
    ///
    /// Must answer [`RateLookup::SameCurrency`] without any I/O when the
    /// codes are equal.
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateLookup;
}

#[async_trait::async_trait]
impl<T: ExchangeRateProvider + ?Sized> ExchangeRateProvider for Arc<T> {
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateLookup {
        (**self).get_rate(from, to).await
    }
}
