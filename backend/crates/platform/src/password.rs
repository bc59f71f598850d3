//! Account Passwords
//!
//! Clear-text passwords are NFKC-normalized, checked against a NIST
//! SP 800-63B style policy, and zeroized on drop. Stored passwords are
//! Argon2id PHC strings. An optional application-wide pepper is appended to
//! the password bytes before hashing and verification.

use std::fmt;

use argon2::{Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Shortest accepted password, in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted password, in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Passwords rejected outright (compared lowercased)
const BLOCKLIST: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "iloveyou",
    "admin123",
    "changeme",
    "learning",
    "student1",
    "teacher1",
    "qwertyuiop",
    "trustno1",
];

/// Keyboard runs that make a password predictable wherever they appear
const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "1qaz2wsx"];

/// Policy rejection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password is required")]
    Blank,

    #[error("Password contains control characters")]
    ControlCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    Predictable,
}

/// Hashing failure; never shown to clients
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is not a valid PHC string")]
    InvalidHashFormat,
}

/// A password as typed, after normalization
///
/// Not `Clone`; the buffer is wiped when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and apply the policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let candidate = Self(normalized);
        candidate.check_policy()?;
        Ok(candidate)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let text = self.0.as_str();
        if text.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = text.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        // Space and tab are allowed; other control characters are not
        if text.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        if is_predictable(text) {
            return Err(PasswordPolicyError::Predictable);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Password bytes followed by the pepper, wiped after use
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Hash with Argon2id and a fresh 16-byte salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }

    /// Constant-time equality, used for confirmation fields
    pub fn matches(&self, other: &ClearTextPassword) -> bool {
        crate::crypto::constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id hash in PHC string format, as stored in `password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Accept a stored PHC string after checking that it parses
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Check `password` against the hash; `pepper` must match the one used
    /// when hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }

    /// Whether the hash predates the current algorithm or cost parameters
    pub fn needs_rehash(&self) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return true;
        };
        if parsed.algorithm != argon2::Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(params) => {
                let current = Params::default();
                params.m_cost() < current.m_cost()
                    || params.t_cost() < current.t_cost()
                    || params.p_cost() < current.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();
    if BLOCKLIST.contains(&lower.as_str()) {
        return true;
    }
    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return true;
    }

    let chars: Vec<char> = lower.chars().collect();
    let single_char = chars.iter().all(|&c| c == chars[0]);
    single_char || is_digit_run(&chars)
}

/// Every character is a digit and each step is +1 or -1 (wrapping 9/0)
fn is_digit_run(chars: &[char]) -> bool {
    let Some(digits) = chars
        .iter()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };

    let step = |a: u32, b: u32| (b + 10 - a) % 10;
    digits.windows(2).all(|w| step(w[0], w[1]) == 1)
        || digits.windows(2).all(|w| step(w[0], w[1]) == 9)
}
