//! Application error type mapping to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use vocalis_types::error::DispatchError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The skill refused or failed the request.
    Dispatch(DispatchError),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Dispatch(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Dispatch(DispatchError::Unauthorized(_)) => {
                (StatusCode::FORBIDDEN, "UNAUTHORIZED_APPLICATION")
            }
            AppError::Dispatch(DispatchError::UnknownIntent(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_INTENT")
            }
            AppError::Dispatch(DispatchError::UnsupportedRequest(_)) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_REQUEST")
            }
            AppError::Dispatch(DispatchError::MalformedRequest(_)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST")
            }
            AppError::Dispatch(DispatchError::HandlerAbandoned(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "HANDLER_ABANDONED")
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Dispatch(e) => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let body = json!({
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": self.message(),
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
