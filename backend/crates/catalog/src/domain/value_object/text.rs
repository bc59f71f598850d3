//! Titles and descriptions

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Maximum title length (in characters)
pub const TITLE_MAX_LENGTH: usize = 200;

/// Maximum description length (in characters)
pub const DESCRIPTION_MAX_LENGTH: usize = 5000;

/// Course or module title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Title is required"));
        }
        if trimmed.chars().count() > TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Title must be at most {} characters",
                TITLE_MAX_LENGTH
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

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Description is required"));
        }
        if trimmed.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Description must be at most {} characters",
                DESCRIPTION_MAX_LENGTH
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
