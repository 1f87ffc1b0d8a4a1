//! Error types for the conversion service.

/// Domain-level errors (business rule violations).
///
/// Every variant is caller-correctable and is raised before any record is
/// written.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Cannot perform conversion for the same currency")]
    SameCurrencyConversion,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Cannot perform conversion for the same currency")]
    SameCurrencyConversion,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for the classified, caller-correctable failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Internal(_))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnsupportedCurrency(msg) => AppError::UnsupportedCurrency(msg),
            DomainError::SameCurrencyConversion => AppError::SameCurrencyConversion,
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_client_errors() {
        let errors = [
            AppError::from(DomainError::UnsupportedCurrency("XXX".into())),
            AppError::from(DomainError::SameCurrencyConversion),
            AppError::from(DomainError::ValidationError("bad amount".into())),
        ];
        assert!(errors.iter().all(AppError::is_client_error));
    }

    #[test]
    fn test_repo_error_is_internal() {
        let err = AppError::from(RepoError::Database("connection refused".into()));
        assert!(matches!(err, AppError::Internal(ref msg) if msg.contains("connection refused")));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::from(DomainError::ValidationError("Amount must be positive".into()));
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Amount must be positive"));
    }
}
