//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::actor::Actor;
use crate::domain::entity::account::AccountProfile;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(rename = "username")]
    pub handle: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request; exactly one of `username` or `email`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, rename = "username")]
    pub handle: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// Identity summary returned by login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request body, used when no `refreshToken` cookie is sent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Access token response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Update profile request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, rename = "username")]
    pub handle: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Change password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Public profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<A: Actor> From<&AccountProfile<A>> for ProfileResponse {
    fn from(profile: &AccountProfile<A>) -> Self {
        Self {
            id: profile.id.value(),
            username: profile.handle.original().to_string(),
            email: profile.email.as_str().to_string(),
            contact: profile.contact.as_str().to_string(),
            address: profile.address.as_str().to_string(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
