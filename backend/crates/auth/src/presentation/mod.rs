//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AuthenticatedActor, CurrentActor, SessionGate, require_actor, require_any_actor,
};
pub use router::{account_router, admin_router, learner_router};
