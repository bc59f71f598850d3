//! Common ID Types
//!
//! Type-safe wrappers around the `BIGSERIAL` identities issued by the
//! database. Markers keep a learner id from being passed where a course id
//! is expected.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CourseId = Id<markers::Course>;
/// let id = CourseId::new(7);
/// assert_eq!(id.value(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw database identity
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw database identity
    pub const fn value(&self) -> i64 {
        self.value
    }
}

// Manual impls so markers don't need to implement anything themselves.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
///
/// Learner and Administrator double as the actor-type parameter of the auth
/// crate, so they carry the usual derives.
pub mod markers {
    /// Marker for learner accounts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Learner;

    /// Marker for administrator accounts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Administrator;

    /// Marker for courses
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Course;

    /// Marker for course modules
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Module;

    /// Marker for module completion records
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Completion;

    /// Marker for payments
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Payment;
}

/// Type aliases for common IDs
pub type LearnerId = Id<markers::Learner>;
pub type AdministratorId = Id<markers::Administrator>;
pub type CourseId = Id<markers::Course>;
pub type ModuleId = Id<markers::Module>;
pub type CompletionId = Id<markers::Completion>;
pub type PaymentId = Id<markers::Payment>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_value_and_display() {
        let id = CourseId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "Id(42)");
    }

    #[test]
    fn test_id_is_copy_without_marker_bounds() {
        let a = LearnerId::new(1);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_parse() {
        let id: ModuleId = "17".parse().unwrap();
        assert_eq!(id, ModuleId::new(17));
        assert!("abc".parse::<ModuleId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&PaymentId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: PaymentId = serde_json::from_str("9").unwrap();
        assert_eq!(back.value(), 9);
    }
}
