//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use conversions_types::dto::{ConversionResponse, ConvertRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between two currencies and record the result
#[utoipa::path(
    post,
    path = "/api/conversions/convert",
    tag = "conversions",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion performed and recorded", body = ConversionResponse),
        (status = 400, description = "Invalid input, unsupported currency, or same currency",
            body = inline(serde_json::Value),
            example = json!({"error": "Cannot perform conversion for the same currency", "code": 400})),
        (status = 500, description = "Conversion could not be stored")
    )
)]
async fn convert() {}

/// Get a conversion by ID
#[utoipa::path(
    get,
    path = "/api/conversions/{id}",
    tag = "conversions",
    params(
        ("id" = i64, Path, description = "Conversion ID")
    ),
    responses(
        (status = 200, description = "Conversion found", body = ConversionResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "No conversion with this ID")
    )
)]
async fn get_conversion() {}

/// List conversions booked against a department, newest first
#[utoipa::path(
    get,
    path = "/api/conversions/department/{department_id}",
    tag = "conversions",
    params(
        ("department_id" = i64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Conversions for the department", body = Vec<ConversionResponse>),
        (status = 400, description = "Malformed department ID")
    )
)]
async fn list_by_department() {}

/// List conversions into a target currency, newest first
#[utoipa::path(
    get,
    path = "/api/conversions/currency/{code}",
    tag = "conversions",
    params(
        ("code" = String, Path, description = "Target currency code (case-insensitive)", example = "EUR")
    ),
    responses(
        (status = 200, description = "Conversions into the currency", body = Vec<ConversionResponse>)
    )
)]
async fn list_by_currency() {}

/// List every conversion, newest first
#[utoipa::path(
    get,
    path = "/api/conversions",
    tag = "conversions",
    responses(
        (status = 200, description = "All conversions", body = Vec<ConversionResponse>)
    )
)]
async fn list_conversions() {}

/// OpenAPI documentation for the Conversions API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Conversion Service API",
        version = "1.0.0",
        description = "Converts amounts between currencies using live exchange rates and keeps an append-only history of every conversion, queryable by department and target currency.",
        license(name = "MIT"),
    ),
    paths(
        health,
        convert,
        get_conversion,
        list_by_department,
        list_by_currency,
        list_conversions,
    ),
    components(
        schemas(
            ConvertRequest,
            ConversionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conversions", description = "Currency conversion and history"),
    )
)]
pub struct ApiDoc;
