//! Query Service
//!
//! Read-only access to the conversion history, shaped for the API.

use conversions_types::{
    AppError, ConversionId, ConversionRepository, ConversionResponse, CurrencyCode, DepartmentId,
};

/// Read-side service over a [`ConversionRepository`].
///
/// Results keep the store's ordering (newest first). Lookups that cannot
/// match anything (a department below 1, a malformed currency code) return
/// an empty list rather than an error.
pub struct QueryService<R: ConversionRepository> {
    repo: R,
}

impl<R: ConversionRepository> QueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets a conversion by id; `Ok(None)` when no record has that id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: ConversionId) -> Result<Option<ConversionResponse>, AppError> {
        let record = self.repo.get_by_id(id).await?;
        Ok(record.map(ConversionResponse::from))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<ConversionResponse>, AppError> {
        let Ok(department_id) = DepartmentId::new(department_id) else {
            return Ok(Vec::new());
        };
        let records = self.repo.get_by_department(department_id).await?;
        Ok(records.into_iter().map(ConversionResponse::from).collect())
    }

    /// Conversions into `code`, matched case-insensitively.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_target_currency(
        &self,
        code: &str,
    ) -> Result<Vec<ConversionResponse>, AppError> {
        let Ok(code) = CurrencyCode::parse(code) else {
            return Ok(Vec::new());
        };
        let records = self.repo.get_by_target_currency(&code).await?;
        Ok(records.into_iter().map(ConversionResponse::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ConversionResponse>, AppError> {
        let records = self.repo.get_all().await?;
        Ok(records.into_iter().map(ConversionResponse::from).collect())
    }
}
