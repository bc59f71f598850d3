//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::gateway::GatewayOrder;
use crate::domain::payment::{Payment, PaymentStatus};

/// Order handed to the checkout widget
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order: GatewayOrder,
}

/// Checkout callback
///
/// Accepts the gateway's own `razorpay_*` field names as well.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(default, alias = "order_id", alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(default, alias = "payment_id", alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
    #[serde(default, alias = "razorpay_signature")]
    pub signature: Option<String>,
}

/// Verification result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub message: &'static str,
    pub payment_status: PaymentStatus,
}

/// Payment body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: i64,
    pub course_id: i64,
    pub learner_id: i64,
    pub admin_id: i64,
    pub amount: i64,
    pub payment_status: PaymentStatus,
    pub order_id: String,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.value(),
            course_id: payment.course_id.value(),
            learner_id: payment.learner_id.value(),
            admin_id: payment.admin_id.value(),
            amount: payment.amount,
            payment_status: payment.status,
            order_id: payment.order_id.clone(),
            date: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
