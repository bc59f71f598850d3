//! Create Order Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CourseId, LearnerId};

use crate::application::config::BillingConfig;
use crate::domain::gateway::{GatewayOrder, OrderRequest, PaymentGateway};
use crate::domain::payment::NewPayment;
use crate::domain::repository::PaymentRepository;
use crate::error::{BillingError, BillingResult};

/// Create order use case
pub struct CreateOrderUseCase<R, G>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<BillingConfig>,
}

impl<R, G> CreateOrderUseCase<R, G>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<BillingConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    /// Open a gateway order for the course and record a pending payment
    pub async fn execute(&self, learner: LearnerId, course_id: CourseId) -> BillingResult<GatewayOrder> {
        let pricing = self
            .repo
            .find_course_pricing(course_id)
            .await?
            .filter(|p| p.price > 0)
            .ok_or(BillingError::CourseUnavailable)?;
        let amount = pricing
            .minor_units()
            .ok_or_else(|| BillingError::Internal(format!("price overflow for course {course_id}")))?;

        let order = self
            .gateway
            .create_order(&OrderRequest {
                amount,
                currency: self.config.currency.clone(),
                receipt: format!("receipt_{}_{}", course_id, Utc::now().timestamp_millis()),
            })
            .await?;

        let payment = self
            .repo
            .create_payment(&NewPayment {
                learner_id: learner,
                course_id,
                admin_id: pricing.owner_id,
                amount: pricing.price,
                order_id: order.id.clone(),
            })
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            course_id = %course_id,
            learner_id = %learner,
            order_id = %order.id,
            "Payment order created"
        );
        Ok(order)
    }
}
