use axum::http::StatusCode;
use thiserror::Error;

use crate::view::PageError;

/// Failure of one backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Alert shown for transport and decode failures.
pub const SERVER_ERROR: &str = "Server Error";

impl ClientError {
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }

    /// Non-2xx answers surface the backend's own message, or `fallback` when
    /// it sent none. Everything else is a generic server error.
    pub fn alert_text(&self, fallback: &str) -> String {
        match self {
            ClientError::Status { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            _ => SERVER_ERROR.to_string(),
        }
    }
}

/// Error returned by the served screens.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        tracing::error!("screen markup is broken: {err}");
        Self::internal(err)
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::bad_request(err.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
