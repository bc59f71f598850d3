//! Infrastructure Layer

pub mod memory;
pub mod postgres;
pub mod razorpay;

pub use memory::InMemoryPaymentRepository;
pub use postgres::PgPaymentRepository;
pub use razorpay::RazorpayGateway;
