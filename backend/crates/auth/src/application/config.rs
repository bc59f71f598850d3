//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Re-export cookie types from platform
pub use platform::cookie::{CookiePolicy, SameSite};

use crate::domain::actor::{Actor, ActorKind};

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Secrets and lifetimes for one actor type
#[derive(Clone)]
pub struct ActorTokenConfig {
    pub access_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_secret: Vec<u8>,
    pub refresh_ttl: Duration,
}

impl Default for ActorTokenConfig {
    fn default() -> Self {
        Self {
            access_secret: Vec::new(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_secret: Vec::new(),
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }
}

impl ActorTokenConfig {
    /// Random 32-byte secrets with default lifetimes
    pub fn with_random_secrets() -> Self {
        Self {
            access_secret: platform::crypto::random_bytes(32),
            refresh_secret: platform::crypto::random_bytes(32),
            ..Self::default()
        }
    }
}

impl fmt::Debug for ActorTokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorTokenConfig")
            .field("access_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_secret", &"[REDACTED]")
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Auth application configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Token settings for learners
    pub learner: ActorTokenConfig,
    /// Token settings for administrators
    pub administrator: ActorTokenConfig,
    /// Attributes of the `accessToken`/`refreshToken` cookies
    pub cookie: CookiePolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with random token secrets for every actor type
    pub fn with_random_secrets() -> Self {
        Self {
            learner: ActorTokenConfig::with_random_secrets(),
            administrator: ActorTokenConfig::with_random_secrets(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::with_random_secrets();
        config.cookie.secure = false;
        config
    }

    /// Token settings for actor type `A`
    pub fn tokens<A: Actor>(&self) -> &ActorTokenConfig {
        match A::KIND {
            ActorKind::Learner => &self.learner,
            ActorKind::Administrator => &self.administrator,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

/// Parse a token lifetime: `<n>s`, `<n>m`, `<n>h`, `<n>d`, or bare seconds
pub fn parse_expiry(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&raw[..idx], c.to_ascii_lowercase()),
        _ => (raw, 's'),
    };
    let n: u64 = digits.trim().parse().ok()?;
    let secs = match unit {
        's' => n,
        'm' => n.checked_mul(60)?,
        'h' => n.checked_mul(3600)?,
        'd' => n.checked_mul(86_400)?,
        _ => return None,
    };
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::markers::{Administrator, Learner};

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_expiry("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_expiry("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_expiry("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_expiry("120"), Some(Duration::from_secs(120)));
        assert_eq!(parse_expiry("0"), None);
        assert_eq!(parse_expiry("1w"), None);
        assert_eq!(parse_expiry("m"), None);
        assert_eq!(parse_expiry(""), None);
    }

    #[test]
    fn test_random_secrets_are_independent() {
        let config = AuthConfig::with_random_secrets();
        let learner = config.tokens::<Learner>();
        let admin = config.tokens::<Administrator>();

        assert_ne!(learner.access_secret, admin.access_secret);
        assert_ne!(learner.access_secret, learner.refresh_secret);
        assert_eq!(learner.access_secret.len(), 32);
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie.secure);
        assert_eq!(config.cookie.same_site, SameSite::Lax);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ActorTokenConfig {
            access_secret: b"super-secret".to_vec(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
