//! Conversion Application Service
//!
//! Orchestrates a conversion through the rate provider and repository ports.
//! Contains NO infrastructure logic - pure business orchestration.

use conversions_types::{
    AppError, ConversionRecord, ConversionRepository, ConvertRequest, CurrencyCode, DepartmentId,
    DomainError, ExchangeRateProvider, NewConversion, RateLookup, RateUnavailable,
};
use rust_decimal::Decimal;

/// Application service for currency conversions.
///
/// Generic over the repository and the rate provider - both adapters are
/// injected at construction. Holds no mutable state, so one instance serves
/// concurrent requests.
pub struct ConversionService<R: ConversionRepository, P: ExchangeRateProvider> {
    repo: R,
    rates: P,
}

impl<R: ConversionRepository, P: ExchangeRateProvider> ConversionService<R, P> {
    /// Creates a new conversion service.
    pub fn new(repo: R, rates: P) -> Self {
        Self { repo, rates }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Convert
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts an amount and records the result.
    ///
    /// Business failures (`UnsupportedCurrency`, `SameCurrencyConversion`,
    /// `BadRequest`) are raised before anything is written. A store failure
    /// surfaces as `Internal`. Each call makes at most one rate lookup and
    /// one write; identical requests produce separate records.
    #[tracing::instrument(
        skip(self, req),
        fields(
            from = req.from_currency.as_deref().unwrap_or(""),
            to = req.to_currency.as_deref().unwrap_or(""),
            amount = %req.amount,
            department_id = req.department_id,
        )
    )]
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConversionRecord, AppError> {
        let (from, to) = parse_pair(req.from_currency.as_deref(), req.to_currency.as_deref())?;
        let department_id = validate_amount_and_department(req.amount, req.department_id)?;

        tracing::info!("Converting {} {} to {}", req.amount, from, to);

        let rate = match self.rates.get_rate(&from, &to).await {
            RateLookup::Resolved(rate) => rate,
            RateLookup::SameCurrency => return Err(DomainError::SameCurrencyConversion.into()),
            RateLookup::Unavailable(reason) => {
                match &reason {
                    RateUnavailable::NetworkFailure(cause) => {
                        tracing::error!(%cause, "Rate lookup failed for {} to {}", from, to)
                    }
                    RateUnavailable::EmptyRate => {
                        tracing::warn!("No exchange rate available for {} to {}", from, to)
                    }
                }
                return Err(DomainError::UnsupportedCurrency(format!(
                    "no exchange rate received from {} to {}",
                    from, to
                ))
                .into());
            }
        };

        let conversion = NewConversion::new(from, to, req.amount, rate, department_id)?;

        let record = self.repo.add(conversion).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store conversion");
            AppError::from(e)
        })?;

        tracing::info!(
            id = %record.id,
            rate = %record.exchange_rate,
            converted_amount = %record.converted_amount,
            "Conversion completed"
        );

        Ok(record)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request validation
// ─────────────────────────────────────────────────────────────────────────────

/// Checks presence, then format, then equality of the currency pair.
fn parse_pair(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(CurrencyCode, CurrencyCode), DomainError> {
    let from = required(from, "from_currency")?;
    let to = required(to, "to_currency")?;

    let from = CurrencyCode::parse(from)?;
    let to = CurrencyCode::parse(to)?;

    if from == to {
        return Err(DomainError::SameCurrencyConversion);
    }
    Ok((from, to))
}

fn required<'a>(code: Option<&'a str>, field: &str) -> Result<&'a str, DomainError> {
    match code {
        Some(code) if !code.trim().is_empty() => Ok(code),
        _ => Err(DomainError::UnsupportedCurrency(format!(
            "{} is required",
            field
        ))),
    }
}

fn validate_amount_and_department(
    amount: Decimal,
    department_id: i64,
) -> Result<DepartmentId, DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::ValidationError(format!(
            "Amount must be greater than 0, got {}",
            amount
        )));
    }
    DepartmentId::new(department_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_normalizes() {
        let (from, to) = parse_pair(Some(" usd"), Some("eUr")).unwrap();
        assert_eq!(from.as_str(), "USD");
        assert_eq!(to.as_str(), "EUR");
    }

    #[test]
    fn test_parse_pair_absent_is_unsupported() {
        assert!(matches!(
            parse_pair(None, Some("EUR")),
            Err(DomainError::UnsupportedCurrency(_))
        ));
        assert!(matches!(
            parse_pair(Some("USD"), Some("   ")),
            Err(DomainError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_parse_pair_bad_format_is_validation() {
        assert!(matches!(
            parse_pair(Some("US"), Some("EUR")),
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            parse_pair(Some("USD"), Some("EU1")),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_pair_same_currency() {
        assert!(matches!(
            parse_pair(Some("gbp"), Some("GBP")),
            Err(DomainError::SameCurrencyConversion)
        ));
    }

    #[test]
    fn test_validate_amount_and_department() {
        assert!(validate_amount_and_department(Decimal::ONE, 1).is_ok());
        assert!(validate_amount_and_department(Decimal::ZERO, 1).is_err());
        assert!(validate_amount_and_department(Decimal::NEGATIVE_ONE, 1).is_err());
        assert!(validate_amount_and_department(Decimal::ONE, 0).is_err());
    }
}
