//! Verify Payment Use Case
//!
//! Checks run cheapest first: field presence, the callback signature, the
//! stored order, and only then the gateway. Nothing is written unless all of
//! them pass, and the final write only moves `pending` rows.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::application::config::BillingConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::PaymentRepository;
use crate::domain::signature::signature_matches;
use crate::error::{BillingError, BillingResult};

/// Checkout callback fields
#[derive(Debug, Default)]
pub struct VerifyPaymentInput {
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
}

/// How verification ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// This call moved the payment to `success`
    Verified,
    /// The payment was already `success`; nothing changed
    AlreadyVerified,
}

fn required(
    violations: &mut Violations,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    present(violations, field, value.map(|v| v.trim().to_string()))
}

/// Like [`required`] but hands the value on untouched
fn present(
    violations: &mut Violations,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Some(v),
        None => {
            violations.add(field, format!("{field} is required"));
            None
        }
    }
}

/// Verify payment use case
pub struct VerifyPaymentUseCase<R, G>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<BillingConfig>,
}

impl<R, G> VerifyPaymentUseCase<R, G>
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

    pub async fn execute(&self, input: VerifyPaymentInput) -> BillingResult<VerifyOutcome> {
        let mut violations = Violations::new();
        let order_id = required(&mut violations, "orderId", input.order_id);
        let payment_id = required(&mut violations, "paymentId", input.payment_id);
        let signature = present(&mut violations, "signature", input.signature);
        let (Some(order_id), Some(payment_id), Some(signature)) = (order_id, payment_id, signature)
        else {
            return Err(violations.into_error().into());
        };

        if !signature_matches(
            self.config.callback_secret(),
            &order_id,
            &payment_id,
            &signature,
        ) {
            tracing::warn!(order_id = %order_id, "Rejected payment callback with bad signature");
            return Err(BillingError::InvalidSignature);
        }

        let payment = self
            .repo
            .find_by_order_id(&order_id)
            .await?
            .ok_or(BillingError::PaymentNotFound)?;
        if payment.is_settled() {
            tracing::debug!(order_id = %order_id, "Payment already verified");
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        let reported = self.gateway.fetch_payment(&payment_id).await?;
        if !reported.is_captured() {
            tracing::info!(
                order_id = %order_id,
                gateway_status = %reported.status,
                "Payment not captured"
            );
            return Err(BillingError::PaymentNotCaptured);
        }

        let moved = self.repo.mark_succeeded(&order_id, &payment_id).await?;
        if moved == 0 {
            // Another callback for the same order got there first
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        tracing::info!(
            payment_id = %payment.id,
            order_id = %order_id,
            course_id = %payment.course_id,
            learner_id = %payment.learner_id,
            "Payment verified"
        );
        Ok(VerifyOutcome::Verified)
    }
}
