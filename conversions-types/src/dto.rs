//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ConversionId, ConversionRecord, CurrencyCode, DepartmentId};

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
///
/// Currency codes are optional at the wire level so that a missing code is
/// reported as an unsupported currency rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Source currency (3 letters, case-insensitive)
    #[schema(example = "USD")]
    pub from_currency: Option<String>,
    /// Target currency (3 letters, case-insensitive)
    #[schema(example = "EUR")]
    pub to_currency: Option<String>,
    /// Amount in the source currency, must be greater than 0
    #[schema(value_type = String, example = "10.00")]
    pub amount: Decimal,
    /// Department the conversion is booked against, at least 1
    #[schema(example = 1)]
    pub department_id: i64,
}

impl ConvertRequest {
    pub fn new(from: &str, to: &str, amount: Decimal, department_id: i64) -> Self {
        Self {
            from_currency: Some(from.to_string()),
            to_currency: Some(to.to_string()),
            amount,
            department_id,
        }
    }
}

/// A stored conversion as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    /// Conversion identifier
    #[schema(value_type = i64, example = 1)]
    pub id: ConversionId,
    #[schema(value_type = String, example = "USD")]
    pub from_currency: CurrencyCode,
    #[schema(value_type = String, example = "EUR")]
    pub to_currency: CurrencyCode,
    /// Rate applied to the amount
    #[schema(value_type = String, example = "0.857829")]
    pub exchange_rate: Decimal,
    #[schema(value_type = String, example = "10")]
    pub amount: Decimal,
    /// Amount in the target currency, rounded to 4 decimal places
    #[schema(value_type = String, example = "8.5783")]
    pub converted_amount: Decimal,
    /// When the conversion was performed (UTC)
    pub conversion_date: DateTime<Utc>,
    #[schema(value_type = i64, example = 1)]
    pub department_id: DepartmentId,
}

impl From<ConversionRecord> for ConversionResponse {
    fn from(record: ConversionRecord) -> Self {
        Self {
            id: record.id,
            from_currency: record.from_currency,
            to_currency: record.to_currency,
            exchange_rate: record.exchange_rate,
            amount: record.amount,
            converted_amount: record.converted_amount,
            conversion_date: record.conversion_date,
            department_id: record.department_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_request_missing_currency_is_none() {
        let req: ConvertRequest =
            serde_json::from_str(r#"{"to_currency": "EUR", "amount": 10, "department_id": 1}"#)
                .unwrap();
        assert!(req.from_currency.is_none());
        assert_eq!(req.to_currency.as_deref(), Some("EUR"));
        assert_eq!(req.amount, dec!(10));
    }

    #[test]
    fn test_convert_request_accepts_string_amount() {
        let req: ConvertRequest = serde_json::from_str(
            r#"{"from_currency": "USD", "to_currency": "EUR", "amount": "12.3456", "department_id": 2}"#,
        )
        .unwrap();
        assert_eq!(req.amount, dec!(12.3456));
        assert_eq!(req.department_id, 2);
    }

    #[test]
    fn test_response_from_record() {
        let record = ConversionRecord::from_parts(
            ConversionId::new(5),
            CurrencyCode::parse("USD").unwrap(),
            CurrencyCode::parse("EUR").unwrap(),
            dec!(10),
            dec!(0.857829),
            dec!(8.5783),
            Utc::now(),
            DepartmentId::new(1).unwrap(),
        );

        let response = ConversionResponse::from(record.clone());
        assert_eq!(response.id, record.id);
        assert_eq!(response.converted_amount, dec!(8.5783));
        assert_eq!(response.conversion_date, record.conversion_date);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["from_currency"], "USD");
        assert_eq!(json["department_id"], 1);
        assert_eq!(json["converted_amount"], "8.5783");
    }
}
