//! Postal Address Value Object

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Maximum address length (in characters)
pub const ADDRESS_MAX_LENGTH: usize = 500;

/// Free-form postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Address is required"));
        }
        if trimmed.chars().count() > ADDRESS_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Address must be at most {} characters",
                ADDRESS_MAX_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
