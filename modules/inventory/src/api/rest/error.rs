use rest_envelope::ApiError;

use crate::domain::error::DomainError;

/// Map domain errors to the envelope error, sanitizing internals.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ArticleNotFound { .. } | DomainError::LibelleNotFound { .. } => {
                ApiError::not_found(e.to_string())
            }
            DomainError::Validation { .. } => ApiError::validation(e.to_string()),
            DomainError::Database { .. } => {
                tracing::error!(error = %e, "Database error");
                ApiError::internal("Une erreur interne est survenue")
            }
        }
    }
}
