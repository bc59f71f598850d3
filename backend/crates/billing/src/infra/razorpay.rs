//! Razorpay Gateway Client
//!
//! REST calls authenticated with HTTP basic auth (`key_id:key_secret`).

use serde::de::DeserializeOwned;

use crate::application::config::{BillingConfig, RazorpayConfig};
use crate::domain::gateway::{GatewayOrder, GatewayPayment, OrderRequest, PaymentGateway};
use crate::error::{BillingError, BillingResult};

/// Razorpay-backed [`PaymentGateway`]
#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    client: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayGateway {
    pub fn new(config: &BillingConfig) -> BillingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.gateway_timeout)
            .build()
            .map_err(|e| BillingError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            client,
            config: config.razorpay.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> BillingResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(BillingError::Gateway(format!("gateway returned {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| BillingError::Gateway(format!("unreadable gateway response: {e}")))
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, order: &OrderRequest) -> BillingResult<GatewayOrder> {
        let response = self
            .client
            .post(self.url("orders"))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(order)
            .send()
            .await
            .map_err(|e| BillingError::Gateway(e.to_string()))?;

        Self::read(response).await
    }

    async fn fetch_payment(&self, payment_id: &str) -> BillingResult<GatewayPayment> {
        let response = self
            .client
            .get(self.url(&format!("payments/{payment_id}")))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await
            .map_err(|e| BillingError::Gateway(e.to_string()))?;

        Self::read(response).await
    }
}
