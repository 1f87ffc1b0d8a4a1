//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use std::sync::Arc;

use crate::domain::{ConversionId, ConversionRecord, CurrencyCode, DepartmentId, NewConversion};
use crate::error::RepoError;

/// Append-only store for conversion records.
///
/// There is no update or delete. Every listing is ordered by
/// `conversion_date` descending, ties broken by `id` descending.
#[async_trait::async_trait]
pub trait ConversionRepository: Send + Sync + 'static {
    /// Appends a conversion and returns it with its assigned id.
    ///
    /// The record must be visible to subsequent reads once this returns.
    async fn add(&self, conversion: NewConversion) -> Result<ConversionRecord, RepoError>;

    /// Gets a conversion by ID.
    async fn get_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError>;

    /// Lists conversions booked against a department.
    async fn get_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<ConversionRecord>, RepoError>;

    /// Lists conversions whose target currency is `code`.
    async fn get_by_target_currency(
        &self,
        code: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError>;

    /// Lists every conversion.
    async fn get_all(&self) -> Result<Vec<ConversionRecord>, RepoError>;
}

#[async_trait::async_trait]
impl<T: ConversionRepository + ?Sized> ConversionRepository for Arc<T> {
    async fn add(&self, conversion: NewConversion) -> Result<ConversionRecord, RepoError> {
        (**self).add(conversion).await
    }

    async fn get_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError> {
        (**self).get_by_id(id).await
    }

    async fn get_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        (**self).get_by_department(department_id).await
    }

    async fn get_by_target_currency(
        &self,
        code: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        (**self).get_by_target_currency(code).await
    }

    async fn get_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        (**self).get_all().await
    }
}
