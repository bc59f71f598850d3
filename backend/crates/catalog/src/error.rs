//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldViolation;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or missing input
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Course not found")]
    CourseNotFound,

    #[error("Module not found")]
    ModuleNotFound,

    /// The course exists but has no modules
    #[error("No modules found for this course")]
    NoModules,

    #[error("No purchased courses found")]
    NoPurchasedCourses,

    /// Not the owner, creator, or an entitled learner
    #[error("You do not have access to this resource")]
    Forbidden,

    /// Course still referenced by payments
    #[error("Course has payments and cannot be deleted")]
    CourseInUse,

    /// Object store failure
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Single-field validation failure
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::CourseNotFound
            | CatalogError::ModuleNotFound
            | CatalogError::NoModules
            | CatalogError::NoPurchasedCourses => ErrorKind::NotFound,
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::CourseInUse => ErrorKind::Conflict,
            CatalogError::Upload(_) => ErrorKind::BadGateway,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(violations) => AppError::bad_request("Validation failed")
                .with_action("Please correct the highlighted fields")
                .with_violations(violations.clone()),
            CatalogError::Upload(_) => AppError::bad_gateway("Upstream service failure")
                .with_action("Please try again later"),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::Upload(msg) => {
                tracing::error!(message = %msg, "Object store upload failed");
            }
            CatalogError::Forbidden => {
                tracing::warn!("Catalog access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        if err.violations().is_empty() {
            CatalogError::Internal(err.to_string())
        } else {
            CatalogError::Validation(err.violations().to_vec())
        }
    }
}
