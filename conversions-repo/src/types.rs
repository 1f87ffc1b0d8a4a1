//! Database row types for the SQLite and PostgreSQL adapters.
//!
//! SQLite has no native decimal or timestamp type, so its rows carry text
//! columns that are parsed back into domain values here.

use sqlx::FromRow;

use conversions_types::{
    ConversionId, ConversionRecord, CurrencyCode, DepartmentId, RepoError,
};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use rust_decimal::Decimal;

// ─────────────────────────────────────────────────────────────────────────────
// Shared column list (both schemas use the same column names)
// ─────────────────────────────────────────────────────────────────────────────

pub const CONVERSION_COLUMNS: &str = "id, from_currency, to_currency, amount, exchange_rate, \
     converted_amount, conversion_date, department_id";

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row as stored by SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteConversionRow {
    pub id: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: String,
    pub exchange_rate: String,
    pub converted_amount: String,
    pub conversion_date: String,
    pub department_id: i64,
}

#[cfg(feature = "sqlite")]
impl SqliteConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let conversion_date = chrono::DateTime::parse_from_rfc3339(&self.conversion_date)
            .map_err(|e| {
                RepoError::InvalidRow(format!(
                    "conversion {}: bad conversion_date {:?}: {}",
                    self.id, self.conversion_date, e
                ))
            })?
            .with_timezone(&chrono::Utc);

        Ok(ConversionRecord::from_parts(
            ConversionId::new(self.id),
            parse_code(self.id, &self.from_currency)?,
            parse_code(self.id, &self.to_currency)?,
            parse_decimal(self.id, "amount", &self.amount)?,
            parse_decimal(self.id, "exchange_rate", &self.exchange_rate)?,
            parse_decimal(self.id, "converted_amount", &self.converted_amount)?,
            conversion_date,
            parse_department(self.id, self.department_id)?,
        ))
    }
}

/// Formats a timestamp the way SQLite rows store it.
///
/// Fixed width (microseconds, `Z` suffix) so text comparison matches
/// chronological order.
#[cfg(feature = "sqlite")]
pub fn format_timestamp(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row as stored by PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgConversionRow {
    pub id: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
    pub exchange_rate: Decimal,
    pub converted_amount: Decimal,
    pub conversion_date: DateTime<Utc>,
    pub department_id: i64,
}

#[cfg(feature = "postgres")]
impl PgConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        Ok(ConversionRecord::from_parts(
            ConversionId::new(self.id),
            parse_code(self.id, &self.from_currency)?,
            parse_code(self.id, &self.to_currency)?,
            self.amount,
            self.exchange_rate,
            self.converted_amount,
            self.conversion_date,
            parse_department(self.id, self.department_id)?,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_code(id: i64, s: &str) -> Result<CurrencyCode, RepoError> {
    CurrencyCode::parse(s)
        .map_err(|e| RepoError::InvalidRow(format!("conversion {}: {}", id, e)))
}

fn parse_department(id: i64, department_id: i64) -> Result<DepartmentId, RepoError> {
    DepartmentId::new(department_id)
        .map_err(|e| RepoError::InvalidRow(format!("conversion {}: {}", id, e)))
}

#[cfg(feature = "sqlite")]
fn parse_decimal(id: i64, column: &str, s: &str) -> Result<rust_decimal::Decimal, RepoError> {
    s.parse().map_err(|e| {
        RepoError::InvalidRow(format!("conversion {}: bad {} {:?}: {}", id, column, s, e))
    })
}
