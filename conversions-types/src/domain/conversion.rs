//! Conversion record domain model.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Number of fractional digits kept in a converted amount.
pub const CONVERTED_AMOUNT_SCALE: u32 = 4;

/// Midpoint rule applied when rounding converted amounts.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Timestamps keep microsecond precision so they survive every store unchanged.
const TIMESTAMP_DIGITS: u16 = 6;

/// Computes `round(amount * rate, 4)` using [`ROUNDING`].
///
/// Returns a validation error when the product does not fit in a `Decimal`.
pub fn converted_amount(amount: Decimal, rate: Decimal) -> Result<Decimal, DomainError> {
    amount
        .checked_mul(rate)
        .map(|product| product.round_dp_with_strategy(CONVERTED_AMOUNT_SCALE, ROUNDING))
        .ok_or_else(|| {
            DomainError::ValidationError(format!(
                "Converted amount overflows: {} * {}",
                amount, rate
            ))
        })
}

/// Store-assigned identity of a conversion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionId(i64);

impl ConversionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConversionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Department a conversion is booked against.
///
/// Only used to partition history; never checked against a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DepartmentId(i64);

impl DepartmentId {
    /// Creates a department id; must be at least 1.
    pub fn new(id: i64) -> Result<Self, DomainError> {
        if id < 1 {
            return Err(DomainError::ValidationError(format!(
                "Department id must be at least 1, got {}",
                id
            )));
        }
        Ok(Self(id))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for DepartmentId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DepartmentId> for i64 {
    fn from(id: DepartmentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A completed conversion that has not been persisted yet.
///
/// Built only through [`NewConversion::new`], which enforces every record
/// invariant; the store turns it into a [`ConversionRecord`] by assigning an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversion {
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub amount: Decimal,
    pub exchange_rate: Decimal,
    pub converted_amount: Decimal,
    pub conversion_date: DateTime<Utc>,
    pub department_id: DepartmentId,
}

impl NewConversion {
    /// Builds a conversion stamped with the current UTC time.
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        amount: Decimal,
        exchange_rate: Decimal,
        department_id: DepartmentId,
    ) -> Result<Self, DomainError> {
        Self::new_at(
            from_currency,
            to_currency,
            amount,
            exchange_rate,
            department_id,
            Utc::now(),
        )
    }

    /// Builds a conversion stamped with the given time (replays and tests).
    pub fn new_at(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        amount: Decimal,
        exchange_rate: Decimal,
        department_id: DepartmentId,
        conversion_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if from_currency == to_currency {
            return Err(DomainError::SameCurrencyConversion);
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::ValidationError(
                "Amount must be greater than 0".into(),
            ));
        }
        if exchange_rate <= Decimal::ZERO {
            return Err(DomainError::ValidationError(
                "Exchange rate must be greater than 0".into(),
            ));
        }

        let converted_amount = converted_amount(amount, exchange_rate)?;

        Ok(Self {
            from_currency,
            to_currency,
            amount,
            exchange_rate,
            converted_amount,
            conversion_date: conversion_date.trunc_subsecs(TIMESTAMP_DIGITS),
            department_id,
        })
    }

    /// Attaches the store-assigned identity.
    pub fn into_record(self, id: ConversionId) -> ConversionRecord {
        ConversionRecord {
            id,
            from_currency: self.from_currency,
            to_currency: self.to_currency,
            amount: self.amount,
            exchange_rate: self.exchange_rate,
            converted_amount: self.converted_amount,
            conversion_date: self.conversion_date,
            department_id: self.department_id,
        }
    }
}

/// A persisted currency conversion.
///
/// Records are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Store-assigned identifier
    pub id: ConversionId,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    /// Amount in the source currency
    pub amount: Decimal,
    /// Rate applied (units of `to_currency` per unit of `from_currency`)
    pub exchange_rate: Decimal,
    /// `round(amount * exchange_rate, 4)`
    pub converted_amount: Decimal,
    /// When the conversion was performed
    pub conversion_date: DateTime<Utc>,
    pub department_id: DepartmentId,
}

impl ConversionRecord {
    /// Reconstructs a record from database fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ConversionId,
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        amount: Decimal,
        exchange_rate: Decimal,
        converted_amount: Decimal,
        conversion_date: DateTime<Utc>,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            id,
            from_currency,
            to_currency,
            amount,
            exchange_rate,
            converted_amount,
            conversion_date,
            department_id,
        }
    }
}
