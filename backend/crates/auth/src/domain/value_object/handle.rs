//! Handle Value Object
//!
//! ハンドルはアカウントの公開識別子。ログインと表示に使用される。
//!
//! ## 設計方針
//! - NFKC正規化 → 前後の空白除去 → 検証 の順で処理
//! - 大文字入力は受け付けるが、一意性は小文字化した canonical で判定
//!
//! ## 不変条件
//! - 長さ: 1〜64文字（正規化後）
//! - 空白・制御文字を含まない

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use unicode_normalization::UnicodeNormalization;

/// Maximum handle length (in characters)
pub const HANDLE_MAX_LENGTH: usize = 64;

/// Account handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    original: String,
    canonical: String,
}

impl Handle {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        if trimmed.chars().count() > HANDLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                HANDLE_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request(
                "Username cannot contain spaces or control characters",
            ));
        }

        Ok(Self {
            original: trimmed.to_string(),
            canonical: trimmed.to_lowercase(),
        })
    }

    /// Restore from database columns (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Display form, as entered
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercased form used for uniqueness and lookup
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
