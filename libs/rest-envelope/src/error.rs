use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::{ApiResponse, ResponseStatus};

/// Handler-level error carrying the HTTP code it maps to.
///
/// Rendered as the standard envelope with `status` mirroring the numeric code
/// and `data` holding optional error detail.
#[derive(Debug, Clone)]
pub struct ApiError {
    code: StatusCode,
    message: String,
    detail: Option<serde_json::Value>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Serialize) -> Self {
        self.detail = serde_json::to_value(detail).ok();
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Generic 500. The underlying cause is logged by the caller, not leaked.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self
            .detail
            .unwrap_or_else(|| json!({ "error": self.message.clone() }));
        let body = ApiResponse {
            data: Some(detail),
            status: ResponseStatus::Code(self.code.as_u16()),
            message: self.message,
        };
        (self.code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let e = ApiError::not_found("Article non trouvé");
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(e.message(), "Article non trouvé");
    }

    #[test]
    fn detail_is_attached() {
        let e = ApiError::validation("invalid").with_detail(json!({ "field": "quantite" }));
        assert!(e.detail.is_some());
    }
}
