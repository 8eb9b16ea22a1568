//! Uniform REST response envelope.
//!
//! Every handler in the workspace answers with the same JSON shape:
//! `{ data, status, message }`. On success `status` carries the fixed
//! `"success"` sentinel; on error it mirrors the numeric HTTP status code and
//! `data` holds error detail.

mod error;
mod page;

pub use error::{ApiError, ApiResult};
pub use page::Page;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel placed in `status` on every success response.
pub const SUCCESS_SENTINEL: &str = "success";

/// `status` field of the envelope: the success sentinel or an HTTP error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ResponseStatus {
    Code(u16),
    Sentinel(String),
}

impl ResponseStatus {
    #[must_use]
    pub fn success() -> Self {
        Self::Sentinel(SUCCESS_SENTINEL.to_owned())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sentinel(s) if s == SUCCESS_SENTINEL)
    }
}

/// The response envelope itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub status: ResponseStatus,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope with a `200 OK` status.
    pub fn ok(data: T, message: impl Into<String>) -> EnvelopedResponse<T> {
        Self::with_code(StatusCode::OK, Some(data), message)
    }

    /// Success envelope with a `201 Created` status.
    pub fn created(data: T, message: impl Into<String>) -> EnvelopedResponse<T> {
        Self::with_code(StatusCode::CREATED, Some(data), message)
    }

    /// Success envelope with no payload.
    pub fn empty(message: impl Into<String>) -> EnvelopedResponse<T> {
        Self::with_code(StatusCode::OK, None, message)
    }

    fn with_code(
        code: StatusCode,
        data: Option<T>,
        message: impl Into<String>,
    ) -> EnvelopedResponse<T> {
        EnvelopedResponse {
            code,
            body: Self {
                data,
                status: ResponseStatus::success(),
                message: message.into(),
            },
        }
    }
}

/// An envelope paired with the HTTP status code it is sent under.
#[derive(Debug)]
pub struct EnvelopedResponse<T> {
    code: StatusCode,
    body: ApiResponse<T>,
}

impl<T: Serialize> IntoResponse for EnvelopedResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_serializes_as_sentinel() {
        let v = serde_json::to_value(ResponseStatus::success()).unwrap();
        assert_eq!(v, serde_json::json!("success"));
    }

    #[test]
    fn error_status_serializes_as_code() {
        let v = serde_json::to_value(ResponseStatus::Code(404)).unwrap();
        assert_eq!(v, serde_json::json!(404));
    }

    #[test]
    fn envelope_round_trips() {
        let body = serde_json::json!({
            "data": null,
            "status": 401,
            "message": "Login ou mot de passe incorrect",
        });
        let parsed: ApiResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.status, ResponseStatus::Code(401));
        assert!(!parsed.status.is_success());
    }
}
