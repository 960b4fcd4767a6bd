use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nanolink_core::StoreError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Boundary error type: wraps store failures so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            // One message for absent and expired, so TTL timing never leaks.
            StoreError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "Alias not found or expired").into_response()
            }
            StoreError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}
