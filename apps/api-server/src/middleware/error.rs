//! Error handling - maps failures to `{"error": "..."}` responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode};
use newsroom_core::DomainError;
use newsroom_core::ports::ModerationError;
use newsroom_shared::ErrorResponse;
use std::fmt;

/// Application-level error type; every variant carries one message.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Internal(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } | DomainError::NoRows(_) => AppError::NotFound(message),
            DomainError::Validation(_) | DomainError::ModificationNotPermitted(_) => {
                AppError::BadRequest(message)
            }
            DomainError::Internal(_) => AppError::Internal(message),
        }
    }
}

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Rejects malformed JSON bodies with a 400 in the standard error shape.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Rejects path segments that do not parse (e.g. `/posts/abc`) with a 400.
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
