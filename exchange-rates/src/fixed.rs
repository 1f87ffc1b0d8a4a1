//! Hardcoded rates for development and testing.

use std::collections::HashMap;

use async_trait::async_trait;
use conversions_types::{CurrencyCode, ExchangeRateProvider, RateLookup};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fractional digits kept on derived cross rates (matches the live provider).
const RATE_SCALE: u32 = 6;

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - units of each currency per 1 USD
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_RATES: &[(&str, Decimal)] = &[
    ("USD", dec!(1)),
    ("EUR", dec!(0.857829)),
    ("GBP", dec!(0.789916)),
    ("INR", dec!(83.12)),
    ("JPY", dec!(151.23)),
    ("CHF", dec!(0.8812)),
    ("CAD", dec!(1.3641)),
    ("AUD", dec!(1.5238)),
];

/// Rate provider backed by an in-process, USD-based table.
///
/// Cross rates are derived as `per_usd[to] / per_usd[from]`. Codes missing
/// from the table have no rate.
#[derive(Debug, Clone)]
pub struct FixedRates {
    per_usd: HashMap<CurrencyCode, Decimal>,
}

impl FixedRates {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            per_usd: HashMap::new(),
        }
    }

    /// Adds or replaces the rate of `code` against USD.
    pub fn with_rate(mut self, code: CurrencyCode, per_usd: Decimal) -> Self {
        self.per_usd.insert(code, per_usd);
        self
    }

    /// Currencies the table knows about, sorted.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<_> = self.per_usd.keys().cloned().collect();
        codes.sort();
        codes
    }

    fn cross_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        let from_per_usd = self.per_usd.get(from)?;
        let to_per_usd = self.per_usd.get(to)?;
        to_per_usd
            .checked_div(*from_per_usd)
            .map(|rate| rate.round_dp(RATE_SCALE))
    }
}

impl Default for FixedRates {
    fn default() -> Self {
        DEFAULT_RATES
            .iter()
            .filter_map(|(code, rate)| CurrencyCode::parse(code).ok().map(|c| (c, *rate)))
            .fold(Self::empty(), |table, (code, rate)| table.with_rate(code, rate))
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRates {
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateLookup {
        if from == to {
            return RateLookup::SameCurrency;
        }
        RateLookup::from_quote(self.cross_rate(from, to))
    }
}
