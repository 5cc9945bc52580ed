//! Application error type and its HTTP mapping.
//!
//! Every fallible layer (storage, validation, password hashing, token
//! handling) funnels into [`AppError`], which implements
//! `actix_web::error::ResponseError` so handlers and middleware can bubble
//! failures with `?` and still answer with the right status and a JSON
//! body. Server-side detail is logged and swapped for a generic message
//! before anything leaves the process.

use actix_web::http::StatusCode;
use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, expired, or foreign-signed credential (401).
    Unauthorized(String),
    /// Input the caller can fix: duplicate registration, rejected
    /// credentials, a move off the end of the list (400).
    BadRequest(String),
    /// Nothing at this id for this owner (404).
    NotFound(String),
    /// A request payload failed validation (400).
    ValidationError(String),
    /// Storage failure (500). Detail stays server-side.
    DatabaseError(String),
    /// Any other unexpected failure (500). Detail stays server-side.
    InternalServerError(String),
}

impl AppError {
    /// What the client is allowed to see. For 5xx variants the stored
    /// detail is replaced by a fixed message.
    fn client_message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                "Internal server error"
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "validation failed: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "database error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.client_message() }))
    }
}

/// `RowNotFound` is the one storage failure the caller caused; everything
/// else is the server's problem.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
