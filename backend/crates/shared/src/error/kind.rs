//! Error Kind
//!
//! [`ErrorKind`] is the only thing about an error that decides the HTTP
//! status. Feature crates pick a kind; the rendering lives in `conversions`.

use std::fmt;

use serde::Serialize;

/// エラー分類
///
/// 各機能クレートのエラー列挙体はこのいずれかに落とし込まれます。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert_eq!(ErrorKind::BadGateway.to_string(), "Bad Gateway");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力不備（フィールド単位の違反を伴うことが多い）
    BadRequest,
    /// トークンなし・検証不能・資格情報の不一致
    Unauthorized,
    /// 本人確認はできたが対象に触れられない（未購入コースなど）
    Forbidden,
    NotFound,
    /// 一意制約・参照制約の衝突
    Conflict,
    /// ストレージやバグ。詳細はログにのみ残す
    InternalServerError,
    /// 決済ゲートウェイ・画像ストレージの失敗
    BadGateway,
}

impl ErrorKind {
    const TABLE: [(ErrorKind, u16, &'static str); 7] = [
        (ErrorKind::BadRequest, 400, "Bad Request"),
        (ErrorKind::Unauthorized, 401, "Unauthorized"),
        (ErrorKind::Forbidden, 403, "Forbidden"),
        (ErrorKind::NotFound, 404, "Not Found"),
        (ErrorKind::Conflict, 409, "Conflict"),
        (ErrorKind::InternalServerError, 500, "Internal Server Error"),
        (ErrorKind::BadGateway, 502, "Bad Gateway"),
    ];

    const fn entry(&self) -> (u16, &'static str) {
        let (_, code, phrase) = Self::TABLE[*self as usize];
        (code, phrase)
    }

    /// HTTP ステータスコード
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.entry().0
    }

    /// 理由フレーズ（RFC 7807 の `title`）
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// 5xx（ログ対象）かどうか
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
