//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Actor types, account entity, repository trait
//! - `application/` - Use cases, token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session gate
//!
//! ## Features
//! - Separate learner and administrator accounts sharing one implementation
//! - Register, login, logout, profile and password management
//! - Short-lived access tokens and rotating refresh tokens (HS256 JWT)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Each actor type signs with its own access and refresh secrets
//! - One live refresh token per account, rotated by compare-and-swap
//! - Logout and password changes revoke the stored refresh token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::actor::{Actor, ActorKind};
pub use domain::entity::account::AccountProfile;
pub use domain::repository::AccountRepository;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountRepository, PgAccountRepository};
pub use presentation::middleware::{
    AuthenticatedActor, CurrentActor, SessionGate, require_actor, require_any_actor,
};
pub use presentation::router::{admin_router, learner_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
