//! Payment Entity
//!
//! A payment starts `pending` when the gateway order is created and moves
//! to `success` once a signed, captured callback is verified. There is no
//! other transition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::id::{AdministratorId, CourseId, LearnerId, PaymentId};
use serde::Serialize;

/// Payment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Stored payment
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub learner_id: LearnerId,
    pub course_id: CourseId,
    /// Owner of the course at purchase time
    pub admin_id: AdministratorId,
    /// Whole currency units
    pub amount: i64,
    pub status: PaymentStatus,
    pub order_id: String,
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

/// Payment about to be inserted, always `pending`
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub learner_id: LearnerId,
    pub course_id: CourseId,
    pub admin_id: AdministratorId,
    pub amount: i64,
    pub order_id: String,
}

/// The parts of a course billing needs
#[derive(Debug, Clone)]
pub struct CoursePricing {
    pub course_id: CourseId,
    /// Whole currency units
    pub price: i64,
    pub owner_id: AdministratorId,
}

impl CoursePricing {
    /// Amount to charge in minor units (`price × 100`)
    pub fn minor_units(&self) -> Option<i64> {
        self.price.checked_mul(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_status_round_trip() {
        for status in [PaymentStatus::Pending, PaymentStatus::Success] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
        assert!("failed".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_minor_units() {
        let pricing = CoursePricing {
            course_id: Id::new(1),
            price: 500,
            owner_id: Id::new(1),
        };
        assert_eq!(pricing.minor_units(), Some(50_000));

        let huge = CoursePricing {
            price: i64::MAX,
            ..pricing
        };
        assert_eq!(huge.minor_units(), None);
    }
}
