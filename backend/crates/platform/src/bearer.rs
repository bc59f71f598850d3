//! Bearer credential extraction (`Authorization: Bearer <token>`)

use axum::http::{HeaderMap, header};

/// Extract the token from an `Authorization: Bearer` header
///
/// The scheme is matched case-insensitively. An empty token counts as absent.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
