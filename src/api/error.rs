// src/api/error.rs

use crate::config::GOOGLE_API_KEY_ENV;
use crate::core::error::{ScanError, TargetError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Every way a request can fail, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("missing Google API key. You need to set the `{}` environment variable", GOOGLE_API_KEY_ENV)]
    MissingApiKey,

    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Target(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingApiKey | ApiError::Scan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        } else {
            warn!(status = %status, error = %self, "Rejected request");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
