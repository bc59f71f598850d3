//! Repository Traits

use kernel::id::{AdministratorId, CourseId, LearnerId, PaymentId};

use crate::domain::payment::{CoursePricing, NewPayment, Payment};
use crate::error::BillingResult;

/// Payment persistence
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    /// Price and owner of a course
    async fn find_course_pricing(&self, course: CourseId) -> BillingResult<Option<CoursePricing>>;

    async fn create_payment(&self, payment: &NewPayment) -> BillingResult<Payment>;

    async fn find_payment(&self, id: PaymentId) -> BillingResult<Option<Payment>>;

    async fn find_by_order_id(&self, order_id: &str) -> BillingResult<Option<Payment>>;

    /// Move every `pending` payment of `order_id` to `success`
    ///
    /// Returns the number of rows moved; zero when already settled.
    async fn mark_succeeded(&self, order_id: &str, gateway_payment_id: &str) -> BillingResult<u64>;

    async fn list_for_learner(&self, learner: LearnerId) -> BillingResult<Vec<Payment>>;

    async fn list_for_admin(&self, admin: AdministratorId) -> BillingResult<Vec<Payment>>;
}
