//! Application Layer
//!
//! Order creation, callback verification, and payment reads.

pub mod config;
pub mod create_order;
pub mod list_payments;
pub mod payment_status;
pub mod verify_payment;

// Re-exports
pub use config::{BillingConfig, RazorpayConfig};
pub use create_order::CreateOrderUseCase;
pub use list_payments::ListPaymentsUseCase;
pub use payment_status::{PaymentStatusUseCase, Viewer};
pub use verify_payment::{VerifyOutcome, VerifyPaymentInput, VerifyPaymentUseCase};
