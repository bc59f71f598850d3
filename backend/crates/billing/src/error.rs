//! Billing Error Types
//!
//! Billing-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldViolation;
use thiserror::Error;

/// Billing-specific result type alias
pub type BillingResult<T> = Result<T, BillingError>;

/// Billing-specific error variants
#[derive(Debug, Error)]
pub enum BillingError {
    /// Malformed or missing input
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Missing course, or one without a price
    #[error("Course not found or price unavailable")]
    CourseUnavailable,

    #[error("Payment not found")]
    PaymentNotFound,

    /// Caller may not see this payment
    #[error("Unauthorized access to payment details")]
    Forbidden,

    /// Checkout callback signature mismatch
    #[error("Payment verification failed: invalid signature")]
    InvalidSignature,

    /// Gateway reports the payment in a state other than captured
    #[error("Payment not captured")]
    PaymentNotCaptured,

    /// Payment gateway failure
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Single-field validation failure
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        BillingError::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::Validation(_)
            | BillingError::InvalidSignature
            | BillingError::PaymentNotCaptured => ErrorKind::BadRequest,
            BillingError::CourseUnavailable | BillingError::PaymentNotFound => {
                ErrorKind::NotFound
            }
            BillingError::Forbidden => ErrorKind::Forbidden,
            BillingError::Gateway(_) => ErrorKind::BadGateway,
            BillingError::Database(_) | BillingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BillingError::Validation(violations) => AppError::bad_request("Validation failed")
                .with_action("Please correct the highlighted fields")
                .with_violations(violations.clone()),
            BillingError::Gateway(_) => AppError::bad_gateway("Upstream service failure")
                .with_action("Please try again later"),
            BillingError::Database(_) | BillingError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BillingError::Database(e) => {
                tracing::error!(error = %e, "Billing database error");
            }
            BillingError::Internal(msg) => {
                tracing::error!(message = %msg, "Billing internal error");
            }
            BillingError::Gateway(msg) => {
                tracing::error!(message = %msg, "Payment gateway failure");
            }
            BillingError::InvalidSignature => {
                tracing::warn!("Payment callback signature mismatch");
            }
            BillingError::Forbidden => {
                tracing::warn!("Payment access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Billing error");
            }
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BillingError {
    fn from(err: AppError) -> Self {
        if err.violations().is_empty() {
            BillingError::Internal(err.to_string())
        } else {
            BillingError::Validation(err.violations().to_vec())
        }
    }
}
