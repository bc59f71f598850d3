//! Contact Number Value Object

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Required number of digits
pub const CONTACT_LENGTH: usize = 10;

/// Ten-digit contact number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact(String);

impl Contact {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.len() != CONTACT_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::bad_request(format!(
                "Contact number must be exactly {} digits",
                CONTACT_LENGTH
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

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
