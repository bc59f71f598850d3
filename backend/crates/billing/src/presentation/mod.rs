//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::BillingAppState;
pub use router::billing_router;
