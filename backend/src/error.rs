//! Backend error type and its mapping onto HTTP responses.

use crate::engine::calculator::QuantityError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::Level;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure while reading the multipart upload stream.
    #[error("Upload error: {0}")]
    Multipart(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuantityError> for ApiError {
    fn from(err: QuantityError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Task join error: {}", err))
    }
}

impl ApiError {
    /// Client errors log at `warn`, server-side failures at `error`.
    pub fn log_level(&self) -> Level {
        if self.status_code().is_server_error() {
            Level::Error
        } else {
            Level::Warn
        }
    }

    /// Logs the error under `context` and builds its HTTP response.
    pub fn log_response(&self, context: &str) -> HttpResponse {
        log::log!(self.log_level(), "{}: {}", context, self);
        self.error_response()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) | ApiError::Csv(_) | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errors are returned as `{"detail": "<message>"}`.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "detail": self.to_string() }))
    }
}
