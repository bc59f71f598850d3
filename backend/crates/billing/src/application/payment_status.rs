//! Payment Status Use Case

use std::sync::Arc;

use kernel::id::{AdministratorId, LearnerId, PaymentId};

use crate::domain::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::error::{BillingError, BillingResult};

/// Who is asking
#[derive(Debug, Clone, Copy)]
pub enum Viewer {
    Learner(LearnerId),
    Administrator(AdministratorId),
}

/// Payment status use case
///
/// A learner sees their own payments; an administrator sees payments for
/// the courses they own.
pub struct PaymentStatusUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> PaymentStatusUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: Viewer, payment_id: PaymentId) -> BillingResult<Payment> {
        let payment = self
            .repo
            .find_payment(payment_id)
            .await?
            .ok_or(BillingError::PaymentNotFound)?;

        let allowed = match viewer {
            Viewer::Learner(learner) => payment.learner_id == learner,
            Viewer::Administrator(admin) => self
                .repo
                .find_course_pricing(payment.course_id)
                .await?
                .is_some_and(|course| course.owner_id == admin),
        };
        if !allowed {
            return Err(BillingError::Forbidden);
        }

        Ok(payment)
    }
}
