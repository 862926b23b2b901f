//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use studium_core::Error;

/// Wrapper so core errors can flow out of handlers with `?`.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) | Error::Extraction(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::EmptyCompletion | Error::GenerationFormat(_) | Error::Provider(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Database(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.0.to_string();
        warn!(
            subsystem = "api",
            status = status.as_u16(),
            error = %message,
            "Request failed"
        );
        (status, Json(json!({ "error": message }))).into_response()
    }
}
