use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Everything a model operation or handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A document the operation needs does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The operation would break a uniqueness rule.
    #[error("{0}")]
    Conflict(String),
    /// A guard condition blocks the operation outright.
    #[error("{0}")]
    Guarded(String),
    /// The request payload is unusable.
    #[error("{0}")]
    BadRequest(String),
    #[error("No token provided")]
    Unauthorized,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Access denied")]
    Forbidden,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    ServerError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::Guarded(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Store(_) | ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            // internal details go to the log, not the client
            error!("request failed: {}", self);
            "Server error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
