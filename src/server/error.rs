use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app::GleanError;

/// Error response wrapper: maps a crawl failure to a status and `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub GleanError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GleanError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GleanError> for ApiError {
    fn from(e: GleanError) -> Self {
        Self(e)
    }
}

/// A body that is not JSON, or not the expected shape, is a bad query.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(GleanError::InvalidQuery(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
