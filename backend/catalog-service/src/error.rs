use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::security::jwt::TokenError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid or expired token")]
    Token(#[from] TokenError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Structured error body shared by every non-auth failure response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: String,
    status: u16,
    error: String,
    message: String,
}

/// Minimal body for authentication failures; deliberately generic so it never
/// reveals whether a username exists or why a token was rejected.
#[derive(Debug, Serialize)]
struct AuthFailureBody {
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::InvalidCredentials | AppError::Unauthenticated | AppError::Token(_) => {
                HttpResponse::build(status).json(AuthFailureBody {
                    message: self.to_string(),
                })
            }
            _ => HttpResponse::build(status).json(ErrorBody {
                timestamp: Utc::now().to_rfc3339(),
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or("Error").to_string(),
                message: self.to_string(),
            }),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
