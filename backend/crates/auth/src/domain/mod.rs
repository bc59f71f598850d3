//! Domain Layer
//!
//! Contains the actor capability, account entities, value objects, and
//! repository traits.

pub mod actor;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use actor::{Actor, ActorKind};
pub use entity::account::{Account, AccountProfile, NewAccount, ProfileChanges};
pub use repository::AccountRepository;
