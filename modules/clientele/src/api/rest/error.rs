use rest_envelope::ApiError;

use crate::domain::error::DomainError;

/// Map domain errors to the envelope error.
///
/// Transactional failures (`Database`, `Internal`) surface as 500 with a
/// sanitized message; the cause stays in the log.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ClientNotFound { .. }
            | DomainError::TelephoneNotFound { .. }
            | DomainError::UserNotFound { .. }
            | DomainError::RoleNotFound { .. } => ApiError::not_found(e.to_string()),
            DomainError::LoginAlreadyExists { .. } | DomainError::Validation { .. } => {
                ApiError::validation(e.to_string())
            }
            DomainError::Unauthorized => ApiError::unauthorized(e.to_string()),
            DomainError::Database { .. } | DomainError::Internal { .. } => {
                tracing::error!(error = %e, "Internal error");
                ApiError::internal("Une erreur interne est survenue")
            }
        }
    }
}
