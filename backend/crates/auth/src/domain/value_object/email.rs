//! Email Value Object
//!
//! Trimmed and lowercased, so lookups and the unique index agree.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// RFC 5321 path limit
const MAX_LENGTH: usize = 254;

/// RFC 5321 local-part limit
const MAX_LOCAL_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let email = raw.as_ref().trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }
        if email.len() > MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {MAX_LENGTH} characters"
            )));
        }
        if !well_formed(&email) {
            return Err(AppError::bad_request("Invalid email address"));
        }
        Ok(Self(email))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `local@label.label[...]` with a dotted ASCII domain
fn well_formed(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local.len() <= MAX_LOCAL_LENGTH
        && !local.contains('@')
        && !local.chars().any(char::is_whitespace);

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        });

    local_ok && domain_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_on_entry() {
        let email = Email::new("  Learner@Courses.EXAMPLE ").unwrap();
        assert_eq!(email.as_str(), "learner@courses.example");
    }

    #[test]
    fn test_accepted_shapes() {
        for ok in ["a@b.co", "first.last@uni.ac.in", "learner+rust@example.com"] {
            assert!(Email::new(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejected_shapes() {
        for bad in [
            "",
            "learner.example.com",
            "learner@",
            "@example.com",
            "a@@example.com",
            "learner@localhost",
            "learner@-bad.com",
            "my learner@example.com",
        ] {
            assert!(Email::new(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_length_limit() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            Email::new(long).unwrap_err().message(),
            "Email must be at most 254 characters"
        );
    }
}
