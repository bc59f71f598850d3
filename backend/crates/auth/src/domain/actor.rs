//! Actor types
//!
//! Learners and administrators are disjoint principals: separate tables,
//! separate token secrets. Everything in this crate that differs between the
//! two is driven by the [`Actor`] capability, so the use cases, the session
//! gate, and the handlers are written once.

use std::fmt;

use kernel::id::markers::{Administrator, Learner};
use serde::{Deserialize, Serialize};

/// Runtime tag for an actor type, embedded in token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Learner,
    Administrator,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Learner => "learner",
            ActorKind::Administrator => "administrator",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor type capability
pub trait Actor: Copy + fmt::Debug + Send + Sync + 'static {
    const KIND: ActorKind;

    /// Table holding this actor type's accounts
    const TABLE: &'static str;
}

impl Actor for Learner {
    const KIND: ActorKind = ActorKind::Learner;
    const TABLE: &'static str = "learners";
}

impl Actor for Administrator {
    const KIND: ActorKind = ActorKind::Administrator;
    const TABLE: &'static str = "administrators";
}
