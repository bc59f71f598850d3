//! Billing Configuration

use std::fmt;
use std::time::Duration;

/// Default gateway base URL
pub const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Default gateway request timeout
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Currency every order is created in
pub const DEFAULT_CURRENCY: &str = "INR";

/// Razorpay credentials
///
/// `key_secret` authenticates API calls and also signs checkout callbacks.
#[derive(Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub base_url: String,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: String::new(),
            base_url: DEFAULT_RAZORPAY_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Billing application configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub razorpay: RazorpayConfig,
    pub currency: String,
    /// Timeout for gateway requests
    pub gateway_timeout: Duration,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            razorpay: RazorpayConfig::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }
}

impl BillingConfig {
    /// Create config for development (test-mode placeholder keys)
    pub fn development() -> Self {
        Self {
            razorpay: RazorpayConfig {
                key_id: "rzp_test_dev".to_string(),
                key_secret: "dev-key-secret".to_string(),
                ..RazorpayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Secret that signs checkout callbacks
    pub fn callback_secret(&self) -> &[u8] {
        self.razorpay.key_secret.as_bytes()
    }
}
