//! Completion Percentage
//!
//! Kept in hundredths of a percent so rounding is exact.

use std::fmt;

use serde::{Serialize, Serializer};

/// Percentage with two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u64);

impl Percentage {
    /// `completed / total × 100`, rounded half away from zero to two decimals
    ///
    /// Returns `None` when `total` is zero.
    pub fn of(completed: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let completed = completed as u64;
        let total = total as u64;
        Some(Self((completed * 20_000 + total) / (2 * total)))
    }

    /// Value in hundredths of a percent
    pub fn hundredths(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(Percentage::of(1, 2).unwrap().to_string(), "50.00");
        assert_eq!(Percentage::of(1, 3).unwrap().to_string(), "33.33");
        assert_eq!(Percentage::of(2, 3).unwrap().to_string(), "66.67");
        assert_eq!(Percentage::of(0, 4).unwrap().to_string(), "0.00");
        assert_eq!(Percentage::of(4, 4).unwrap().to_string(), "100.00");
        // 1/32 = 3.125 rounds up
        assert_eq!(Percentage::of(1, 32).unwrap().to_string(), "3.13");
        assert!(Percentage::of(0, 0).is_none());
    }
}
