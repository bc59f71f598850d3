//! Account password value objects
//!
//! Thin domain wrappers over `platform::password`. Policy failures surface
//! as user-facing `AppError`s, hashing failures as internal ones.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};

/// Password as submitted in a register, login, or password-change request
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Apply the password policy
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|policy| AppError::bad_request(policy.to_string()))
    }

    /// Parse a login password
    ///
    /// Anything the policy rejects can never match a stored hash, so the
    /// caller reports it as bad credentials instead of revealing the policy.
    pub fn for_verification(raw: String) -> Option<Self> {
        ClearTextPassword::new(raw).ok().map(Self)
    }

    /// `password` vs `confirmPassword`
    pub fn matches(&self, other: &RawPassword) -> bool {
        self.0.matches(&other.0)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored password hash (`password_hash` column)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    /// Restore from the `password_hash` column
    pub fn from_phc_string(phc: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }

    /// Whether login should store a fresh hash
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
