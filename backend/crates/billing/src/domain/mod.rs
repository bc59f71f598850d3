//! Domain Layer
//!
//! Payment entity and state, callback signatures, and the persistence and
//! gateway interfaces.

pub mod gateway;
pub mod payment;
pub mod repository;
pub mod signature;

// Re-exports
pub use gateway::{GatewayOrder, GatewayPayment, OrderRequest, PaymentGateway};
pub use payment::{CoursePricing, NewPayment, Payment, PaymentStatus};
pub use repository::PaymentRepository;
