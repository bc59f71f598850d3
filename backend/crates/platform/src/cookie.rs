//! Cookie Management Infrastructure
//!
//! Builds the `httpOnly` cookies that carry access and refresh tokens.

use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{self, Cookie, CookieJar};

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    fn to_cookie(self) -> cookie::SameSite {
        match self {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            other => Err(format!("unknown SameSite policy: {other}")),
        }
    }
}

/// Attributes shared by every token cookie
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookiePolicy {
    /// Build a cookie that lives for `max_age`
    pub fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        let secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        Cookie::build((name, value))
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site.to_cookie())
            .max_age(time::Duration::seconds(secs))
            .build()
    }

    /// Build an already-expired cookie that clears `name` on the client
    pub fn removal(&self, name: &'static str) -> Cookie<'static> {
        Cookie::build((name, ""))
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site.to_cookie())
            .max_age(time::Duration::ZERO)
            .build()
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
