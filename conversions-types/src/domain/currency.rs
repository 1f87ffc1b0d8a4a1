//! ISO-4217 style currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A three-letter currency code, always stored upper-case.
///
/// The code is not checked against a registry of known currencies; whether a
/// pair is convertible is decided by the rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const LEN: usize = 3;

    /// Parses and normalizes a currency code.
    ///
    /// Surrounding whitespace is ignored and the result is upper-cased, so
    /// `" usd"` and `"USD"` yield the same code.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let trimmed = code.trim();
        if trimmed.len() != Self::LEN || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(DomainError::ValidationError(format!(
                "Currency code must be {} letters, got '{}'",
                Self::LEN,
                code
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let code = CurrencyCode::parse("usd").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code, CurrencyCode::parse("UsD").unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(CurrencyCode::parse(" eur ").unwrap().as_str(), "EUR");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            CurrencyCode::parse("US"),
            Err(DomainError::ValidationError(_))
        ));
        assert!(CurrencyCode::parse("USDT").is_err());
        assert!(CurrencyCode::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_letters() {
        assert!(CurrencyCode::parse("U5D").is_err());
        assert!(CurrencyCode::parse("€UR").is_err());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let code: CurrencyCode = serde_json::from_str("\"gbp\"").unwrap();
        assert_eq!(code.as_str(), "GBP");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"GBP\"");
        assert!(serde_json::from_str::<CurrencyCode>("\"POUND\"").is_err());
    }
}
