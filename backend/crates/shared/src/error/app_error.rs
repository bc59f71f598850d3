//! Application Error
//!
//! [`AppError`] is what crosses crate boundaries and what gets rendered.
//! Feature crates keep their own `thiserror` enums and convert at the
//! handler edge.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;
use crate::validation::FieldViolation;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// アプリケーション統一エラー
///
/// `message` と `action` はそのままレスポンス本文に載ります。内部情報は
/// `source` に入れてください（ログにのみ出力されます）。
///
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::bad_request("Validation failed")
///     .with_violation("price", "Price must be a whole number");
/// assert_eq!(err.status_code(), 400);
/// assert_eq!(err.violations()[0].field(), "price");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    violations: Vec<FieldViolation>,
    source: Option<BoxedSource>,
}

/// 統一結果型
pub type AppResult<T> = Result<T, AppError>;

macro_rules! kind_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(message: impl Into<Cow<'static, str>>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            violations: Vec::new(),
            source: None,
        }
    }

    kind_constructors! {
        /// 400
        bad_request => BadRequest;
        /// 401
        unauthorized => Unauthorized;
        /// 403
        forbidden => Forbidden;
        /// 404
        not_found => NotFound;
        /// 409
        conflict => Conflict;
        /// 500（メッセージは汎用文言にすること）
        internal => InternalServerError;
        /// 502
        bad_gateway => BadGateway;
    }

    /// クライアントへの次の一手（「再ログインしてください」など）
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_violation(
        mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        self.violations.push(FieldViolation::new(field, message));
        self
    }

    pub fn with_violations(mut self, violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        self.violations.extend(violations);
        self
    }

    /// 原因エラーを保持（ログ専用）
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("violations", &self.violations)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_the_kind() {
        let cases = [
            (AppError::bad_request("x"), 400),
            (AppError::unauthorized("x"), 401),
            (AppError::forbidden("x"), 403),
            (AppError::not_found("x"), 404),
            (AppError::conflict("x"), 409),
            (AppError::internal("x"), 500),
            (AppError::bad_gateway("x"), 502),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn test_violations_keep_their_order() {
        let err = AppError::bad_request("Validation failed")
            .with_violation("contact", "Contact must be exactly 10 digits")
            .with_violations([FieldViolation::new("email", "Invalid email address")]);
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field()).collect();
        assert_eq!(fields, ["contact", "email"]);
    }

    #[test]
    fn test_source_stays_out_of_the_message() {
        let err = AppError::internal("Internal server error")
            .with_source(std::io::Error::other("connection reset by peer"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Internal Server Error: Internal server error");
        assert!(format!("{err:?}").contains("connection reset"));
    }

    #[test]
    fn test_action_is_optional() {
        assert!(AppError::not_found("Course not found").action().is_none());
        let err = AppError::unauthorized("Invalid or expired token").with_action("Please sign in again");
        assert_eq!(err.action(), Some("Please sign in again"));
    }
}
