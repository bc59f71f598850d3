//! Field-level validation reporting
//!
//! Value objects validate one field at a time and fail with an [`AppError`].
//! [`Violations`] collects those failures so a request reports every bad
//! field at once instead of stopping at the first.

use std::borrow::Cow;

use serde::Serialize;

use crate::error::app_error::{AppError, AppResult};

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    field: Cow<'static, str>,
    message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Collector for field violations
///
/// ```rust
/// use kernel::error::app_error::AppError;
/// use kernel::validation::Violations;
///
/// let mut violations = Violations::new();
/// let name: Option<String> = violations.check("name", Ok("ok".to_string()));
/// let _age: Option<u8> = violations.check("age", Err(AppError::bad_request("Age is required")));
/// assert!(name.is_some());
/// assert_eq!(violations.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation directly
    pub fn add(&mut self, field: impl Into<Cow<'static, str>>, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Keep the value on success, record the error message under `field` on failure
    pub fn check<T>(&mut self, field: &'static str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) if err.violations().is_empty() => {
                self.add(field, err.message().to_string());
                None
            }
            Err(err) => {
                self.0.extend(err.violations().iter().cloned());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 400 error carrying every collected violation
    pub fn into_error(self) -> AppError {
        AppError::bad_request("Validation failed")
            .with_action("Please correct the highlighted fields")
            .with_violations(self.0)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_failure() {
        let mut violations = Violations::new();
        let a: Option<u8> = violations.check("a", Err(AppError::bad_request("a is bad")));
        let b: Option<u8> = violations.check("b", Ok(2));
        let c: Option<u8> = violations.check("c", Err(AppError::bad_request("c is bad")));

        assert!(a.is_none());
        assert_eq!(b, Some(2));
        assert!(c.is_none());

        let err = violations.into_error();
        assert_eq!(err.status_code(), 400);
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec!["a", "c"]);
    }

    #[test]
    fn test_nested_violations_are_flattened() {
        let inner = AppError::bad_request("Validation failed").with_violation("inner", "nope");
        let mut violations = Violations::new();
        let _: Option<()> = violations.check("outer", Err(inner));
        let err = violations.into_error();
        assert_eq!(err.violations()[0].field(), "inner");
    }

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(Violations::new().into_result().is_ok());
    }
}
