//! Payment gateway interface

use serde::{Deserialize, Serialize};

use crate::error::BillingResult;

/// Status the gateway reports once funds are taken
pub const CAPTURED: &str = "captured";

/// Order creation request
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Minor units
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// Order as the gateway returns it; passed through to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payment as the gateway reports it
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayPayment {
    pub id: String,
    pub status: String,
}

impl GatewayPayment {
    pub fn is_captured(&self) -> bool {
        self.status == CAPTURED
    }
}

/// Outbound payment gateway
///
/// Transport and upstream failures surface as `BillingError::Gateway`.
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    async fn create_order(&self, order: &OrderRequest) -> BillingResult<GatewayOrder>;

    async fn fetch_payment(&self, payment_id: &str) -> BillingResult<GatewayPayment>;
}
