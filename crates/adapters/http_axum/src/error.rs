//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devconf_domain::error::DevConfError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DevConfError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(DevConfError);

impl From<DevConfError> for ApiError {
    fn from(err: DevConfError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DevConfError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DevConfError::NullArgument(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DevConfError::InvalidOwnershipTransition(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            DevConfError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            DevConfError::Storage(err) => {
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
