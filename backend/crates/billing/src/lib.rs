//! Billing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Payment entity and state, callback signatures, repository
//!   and gateway traits
//! - `application/` - Order, verification, and read use cases
//! - `infra/` - Postgres, in-memory, and Razorpay implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Payment Flow
//! - An order is opened at the gateway and recorded as `pending`
//! - The checkout callback is accepted only with a valid HMAC signature
//!   and a gateway status of `captured`
//! - Only `pending` rows move to `success`, so repeated callbacks are no-ops

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{BillingConfig, RazorpayConfig};
pub use domain::gateway::PaymentGateway;
pub use domain::repository::PaymentRepository;
pub use error::{BillingError, BillingResult};
pub use infra::{InMemoryPaymentRepository, PgPaymentRepository, RazorpayGateway};
pub use presentation::{BillingAppState, billing_router};
