//! Course Price Value Object
//!
//! Whole currency units. The payment gateway is charged in minor units
//! (`× 100`).

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Non-negative price in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    pub fn new(value: i64) -> AppResult<Self> {
        if value < 0 {
            return Err(AppError::bad_request("Price cannot be negative"));
        }
        if value.checked_mul(100).is_none() {
            return Err(AppError::bad_request("Price is too large"));
        }
        Ok(Self(value))
    }

    /// Parse a form field
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::bad_request("Price must be a whole number"))?;
        Self::new(value)
    }

    pub fn from_db(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_free(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(Price::parse(" 500 ").unwrap().value(), 500);
        assert!(Price::parse("0").unwrap().is_free());
        assert!(Price::parse("-1").is_err());
        assert!(Price::parse("12.50").is_err());
        assert!(Price::parse("abc").is_err());
        assert!(Price::new(i64::MAX).is_err());
    }
}
