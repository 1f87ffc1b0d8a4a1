//! # Conversions Hex
//!
//! Application service layer and HTTP adapter for the currency conversion service.
//!
//! ## Architecture
//!
//! - `service/` - Conversion orchestrator (validate, fetch rate, compute, persist)
//! - `query/` - Read-side service over the conversion history
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Services are generic over `R: ConversionRepository` and
//! `P: ExchangeRateProvider`, so adapters are injected at construction.

pub mod inbound;
pub mod openapi;
pub mod query;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use query::QueryService;
pub use service::ConversionService;
