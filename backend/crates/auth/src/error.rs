//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldViolation;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// No credential presented
    #[error("Authentication required")]
    Unauthorized,

    /// Credential present but unverifiable, expired, revoked, or for a
    /// deleted account. Every cause renders the same response.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Unknown account or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Handle or email already registered
    #[error("An account with this username or email already exists")]
    AccountExists,

    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// Account still referenced by courses or payments
    #[error("Account still owns courses or payments")]
    AccountInUse,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Single-field validation failure
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Unauthorized | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            AuthError::AccountExists | AuthError::AccountInUse => ErrorKind::Conflict,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Storage and internal failures are masked; their detail only reaches
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(violations) => AppError::bad_request("Validation failed")
                .with_action("Please correct the highlighted fields")
                .with_violations(violations.clone()),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::Unauthorized | AuthError::InvalidToken => {
                AppError::new(self.kind(), self.to_string()).with_action("Please sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.violations().is_empty() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.violations().to_vec())
        }
    }
}
