//! # Conversions Client SDK
//!
//! A typed Rust client for the Currency Conversion API.

use conversions_types::{ConversionId, ConversionResponse, ConvertRequest, CurrencyCode};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Conversions API client.
pub struct ConversionsClient {
    base_url: String,
    http: Client,
}

impl ConversionsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts an amount and records the conversion.
    pub async fn convert(
        &self,
        from_currency: &str,
        to_currency: &str,
        amount: Decimal,
        department_id: i64,
    ) -> Result<ConversionResponse, ClientError> {
        let req = ConvertRequest::new(from_currency, to_currency, amount, department_id);
        self.post("/api/conversions/convert", &req).await
    }

    /// Gets a conversion by ID.
    pub async fn get_conversion(&self, id: ConversionId) -> Result<ConversionResponse, ClientError> {
        self.get(&format!("/api/conversions/{}", id)).await
    }

    /// Lists conversions booked against a department, newest first.
    pub async fn by_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<ConversionResponse>, ClientError> {
        self.get(&format!("/api/conversions/department/{}", department_id))
            .await
    }

    /// Lists conversions into a target currency, newest first.
    ///
    /// A code that is not three letters matches nothing, so no request is sent.
    pub async fn by_currency(&self, code: &str) -> Result<Vec<ConversionResponse>, ClientError> {
        let Ok(code) = CurrencyCode::parse(code) else {
            return Ok(Vec::new());
        };
        self.get(&format!("/api/conversions/currency/{}", code)).await
    }

    /// Lists every conversion, newest first.
    pub async fn list_conversions(&self) -> Result<Vec<ConversionResponse>, ClientError> {
        self.get("/api/conversions").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
