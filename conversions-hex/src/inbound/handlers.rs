//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use conversions_types::{
    AppError, ConversionId, ConversionRepository, ConversionResponse, ConvertRequest,
    ExchangeRateProvider,
};

use crate::{ConversionService, QueryService};

/// Application state shared across handlers.
pub struct AppState<R: ConversionRepository, P: ExchangeRateProvider> {
    pub converter: ConversionService<R, P>,
    pub queries: QueryService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_)
            | AppError::UnsupportedCurrency(_)
            | AppError::SameCurrencyConversion => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount and record the conversion.
#[tracing::instrument(skip(state, body))]
pub async fn convert<R: ConversionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    body: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let record = state.converter.convert(req).await?;
    Ok(Json(ConversionResponse::from(record)))
}

/// Get a conversion by ID.
#[tracing::instrument(skip(state), fields(conversion_id = %id))]
pub async fn get_conversion<R: ConversionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conversion_id: ConversionId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid conversion ID".into()))?;

    let conversion = state
        .queries
        .get_by_id(conversion_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Conversion {}", conversion_id)))?;
    Ok(Json(conversion))
}

/// List conversions booked against a department.
#[tracing::instrument(skip(state))]
pub async fn list_by_department<R: ConversionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(department_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let department_id: i64 = department_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid department ID".into()))?;

    let conversions = state.queries.get_by_department(department_id).await?;
    Ok(Json(conversions))
}

/// List conversions into a target currency.
#[tracing::instrument(skip(state))]
pub async fn list_by_currency<R: ConversionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conversions = state.queries.get_by_target_currency(&code).await?;
    Ok(Json(conversions))
}

/// List every conversion, newest first.
#[tracing::instrument(skip(state))]
pub async fn list_conversions<R: ConversionRepository, P: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let conversions = state.queries.get_all().await?;
    Ok(Json(conversions))
}
