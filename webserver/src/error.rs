//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use engine::{EngineError, StoreError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Engine(EngineError::Eligibility(_)) => StatusCode::CONFLICT,
            ApiError::Engine(EngineError::Store(store)) => match store {
                StoreError::ItemNotFound { .. } | StoreError::UserNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                StoreError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
                _ => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            warn!(%status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
