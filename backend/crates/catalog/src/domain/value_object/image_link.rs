//! Image Link Value Object

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use url::Url;

/// Absolute `http`/`https` URL of a course image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink(String);

impl ImageLink {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let url = Url::parse(raw.as_ref().trim())
            .map_err(|_| AppError::bad_request("Image link must be an absolute URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::bad_request("Image link must use http or https"));
        }
        Ok(Self(url.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
