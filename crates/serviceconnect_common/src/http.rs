// --- File: crates/serviceconnect_common/src/http.rs ---
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, ServiceConnectError};

/// Renders the error as `{"error": {"message", "code"}}` with the mapped status.
impl IntoResponse for ServiceConnectError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

// Extractor rejections become client errors with the usual error body.
impl From<JsonRejection> for ServiceConnectError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceConnectError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceConnectError {
    fn from(rejection: PathRejection) -> Self {
        ServiceConnectError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceConnectError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceConnectError::ValidationError(rejection.body_text())
    }
}
