//! Process configuration
//!
//! Everything comes from environment variables. Release builds refuse to
//! start without token secrets and gateway keys; debug builds fall back to
//! random or placeholder values.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::ActorTokenConfig;
use auth::application::config::{SameSite, parse_expiry};
use billing::BillingConfig;
use catalog::CatalogConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Full server configuration
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub billing: BillingConfig,
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(!cfg!(debug_assertions), |key| std::env::var(key).ok())
    }

    /// Load through `lookup`; `release` makes secrets mandatory
    pub fn from_lookup<F>(release: bool, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;
        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => catalog::application::config::DEFAULT_UPLOAD_TIMEOUT,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            auth: auth_config(release, &get)?,
            catalog: catalog_config(release, &get, upstream_timeout),
            billing: billing_config(release, &get, upstream_timeout)?,
        })
    }
}

fn auth_config(
    release: bool,
    get: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<AuthConfig> {
    let mut config = if release {
        AuthConfig::default()
    } else {
        AuthConfig::development()
    };

    config.learner = actor_tokens(release, get, "LEARNER", config.learner)?;
    config.administrator = actor_tokens(release, get, "ADMIN", config.administrator)?;

    if let Some(pepper) = get("PASSWORD_PEPPER") {
        config.password_pepper = Some(pepper.into_bytes());
    }
    if let Some(raw) = get("COOKIE_SECURE") {
        config.cookie.secure = raw
            .parse::<bool>()
            .context("COOKIE_SECURE must be true or false")?;
    }
    if let Some(raw) = get("COOKIE_SAME_SITE") {
        config.cookie.same_site = raw
            .parse::<SameSite>()
            .map_err(anyhow::Error::msg)?;
    }

    Ok(config)
}

fn actor_tokens(
    release: bool,
    get: &impl Fn(&str) -> Option<String>,
    prefix: &str,
    fallback: ActorTokenConfig,
) -> anyhow::Result<ActorTokenConfig> {
    let secret = |kind: &str, fallback: Vec<u8>| -> anyhow::Result<Vec<u8>> {
        let key = format!("{prefix}_{kind}_TOKEN_SECRET");
        match get(&key) {
            Some(value) => Ok(value.into_bytes()),
            None if release => bail!("{key} must be set"),
            None => Ok(fallback),
        }
    };
    let expiry = |kind: &str, fallback: Duration| -> anyhow::Result<Duration> {
        let key = format!("{prefix}_{kind}_TOKEN_EXPIRY");
        match get(&key) {
            Some(raw) => parse_expiry(&raw).with_context(|| format!("{key} is not a valid expiry")),
            None => Ok(fallback),
        }
    };

    Ok(ActorTokenConfig {
        access_secret: secret("ACCESS", fallback.access_secret)?,
        access_ttl: expiry("ACCESS", fallback.access_ttl)?,
        refresh_secret: secret("REFRESH", fallback.refresh_secret)?,
        refresh_ttl: expiry("REFRESH", fallback.refresh_ttl)?,
    })
}

fn catalog_config(
    release: bool,
    get: &impl Fn(&str) -> Option<String>,
    upstream_timeout: Duration,
) -> CatalogConfig {
    let mut config = if release {
        CatalogConfig::default()
    } else {
        CatalogConfig::development()
    };

    if let Some(name) = get("CLOUDINARY_CLOUD_NAME") {
        config.cloudinary.cloud_name = name;
    }
    if let Some(key) = get("CLOUDINARY_API_KEY") {
        config.cloudinary.api_key = key;
    }
    if let Some(secret) = get("CLOUDINARY_API_SECRET") {
        config.cloudinary.api_secret = secret;
    }
    if config.cloudinary.cloud_name.is_empty() {
        tracing::warn!("CLOUDINARY_CLOUD_NAME not set, image uploads will fail");
    }
    config.upload_timeout = upstream_timeout;
    config
}

fn billing_config(
    release: bool,
    get: &impl Fn(&str) -> Option<String>,
    upstream_timeout: Duration,
) -> anyhow::Result<BillingConfig> {
    let mut config = if release {
        BillingConfig::default()
    } else {
        BillingConfig::development()
    };

    match (get("RAZORPAY_KEY_ID"), get("RAZORPAY_KEY_SECRET")) {
        (Some(key_id), Some(key_secret)) => {
            config.razorpay.key_id = key_id;
            config.razorpay.key_secret = key_secret;
        }
        _ if release => bail!("RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET must be set"),
        _ => {}
    }
    if let Some(base_url) = get("RAZORPAY_BASE_URL") {
        config.razorpay.base_url = base_url;
    }
    config.gateway_timeout = upstream_timeout;
    Ok(config)
}
