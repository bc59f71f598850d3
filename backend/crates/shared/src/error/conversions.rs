//! Error conversions
//!
//! Storage classification helpers and the HTTP rendering of [`AppError`].

#[cfg(feature = "sqlx")]
pub use self::database::DatabaseErrorExt;

#[cfg(feature = "sqlx")]
mod database {
    /// PostgreSQL constraint classification
    ///
    /// https://www.postgresql.org/docs/current/errcodes-appendix.html
    pub trait DatabaseErrorExt {
        /// `23505 unique_violation`
        fn is_unique_violation(&self) -> bool;

        /// `23503 foreign_key_violation`
        fn is_foreign_key_violation(&self) -> bool;
    }

    fn sqlstate(err: &sqlx::Error) -> Option<String> {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    impl DatabaseErrorExt for sqlx::Error {
        fn is_unique_violation(&self) -> bool {
            sqlstate(self).as_deref() == Some("23505")
        }

        fn is_foreign_key_violation(&self) -> bool {
            sqlstate(self).as_deref() == Some("23503")
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });
        if !self.violations().is_empty() {
            body["errors"] = serde_json::json!(self.violations());
        }

        (status, Json(body)).into_response()
    }
}
