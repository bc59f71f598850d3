//! Payment listings

use std::sync::Arc;

use kernel::id::{AdministratorId, LearnerId};

use crate::domain::payment::Payment;
use crate::domain::repository::PaymentRepository;
use crate::error::BillingResult;

/// List payments use case
pub struct ListPaymentsUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> ListPaymentsUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Payments made by the learner
    pub async fn for_learner(&self, learner: LearnerId) -> BillingResult<Vec<Payment>> {
        self.repo.list_for_learner(learner).await
    }

    /// Payments for courses the administrator owned at purchase time
    pub async fn for_admin(&self, admin: AdministratorId) -> BillingResult<Vec<Payment>> {
        self.repo.list_for_admin(admin).await
    }
}
