//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dungeon_domain::error::DungeonError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DungeonError`] to an HTTP response with appropriate status code.
pub struct ApiError(DungeonError);

impl From<DungeonError> for ApiError {
    fn from(err: DungeonError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DungeonError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DungeonError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            DungeonError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
