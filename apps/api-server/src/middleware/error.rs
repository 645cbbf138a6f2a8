//! Error handling - every failure leaves as `{ "msg": ... }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use brawl_core::DomainError;
use brawl_core::ports::AuthError;
use brawl_shared::{ErrorResponse, INVALID_TOKEN_MSG, MISSING_TOKEN_MSG};

/// Application-level error type rendered as an `ErrorResponse`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", MISSING_TOKEN_MSG)]
    MissingToken,

    #[error("{}", INVALID_TOKEN_MSG)]
    InvalidToken,

    #[error("User not authorized")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// Detail is logged, never returned.
    #[error("Server Error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Ownership refusals share the 401 of token failures; `msg` tells them apart.
            AppError::MissingToken | AppError::InvalidToken | AppError::Forbidden => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                ErrorResponse::server_error()
            }
            other => ErrorResponse::new(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Conflict(msg) => AppError::BadRequest(msg),
            DomainError::Auth(auth) => auth.into(),
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::BadRequest(err.to_string()),
            AuthError::MissingToken => AppError::MissingToken,
            AuthError::TokenExpired | AuthError::InvalidToken(_) => AppError::InvalidToken,
            AuthError::HashingError(_) | AuthError::SigningError(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
