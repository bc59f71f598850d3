//! Token Service
//!
//! HS256 JWT issuance and verification. Each actor type signs with its own
//! access and refresh secrets, and the claims also record the actor type and
//! token kind. A learner token never verifies as an administrator token
//! even if the secrets were configured identically.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::Id;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::actor::{Actor, ActorKind};
use crate::domain::entity::account::AccountProfile;
use crate::error::{AuthError, AuthResult};

/// Access or refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
///
/// `name`/`email` are display hints on access tokens only; authorization
/// always re-reads the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub actor: ActorKind,
    pub typ: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// A signed token and how long it lives (for cookie `Max-Age`)
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub ttl: Duration,
}

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Token issuance and verification
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue an access token carrying display claims
    pub fn issue_access_token<A: Actor>(
        &self,
        profile: &AccountProfile<A>,
    ) -> AuthResult<IssuedToken> {
        self.sign::<A>(
            profile.id,
            TokenKind::Access,
            Some(profile.handle.original().to_string()),
            Some(profile.email.as_str().to_string()),
        )
    }

    /// Issue a refresh token carrying only the identity
    pub fn issue_refresh_token<A: Actor>(&self, id: Id<A>) -> AuthResult<IssuedToken> {
        self.sign::<A>(id, TokenKind::Refresh, None, None)
    }

    /// Issue both tokens for an account
    pub fn issue_pair<A: Actor>(&self, profile: &AccountProfile<A>) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue_access_token(profile)?,
            refresh: self.issue_refresh_token(profile.id)?,
        })
    }

    /// Verify a token of `kind` for actor type `A`
    ///
    /// Expired, malformed, wrong-secret, wrong-actor, and wrong-kind tokens
    /// all fail with `InvalidToken`.
    pub fn verify<A: Actor>(&self, token: &str, kind: TokenKind) -> AuthResult<Id<A>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let key = DecodingKey::from_secret(self.secret::<A>(kind));
        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            tracing::debug!(error = %e, actor = %A::KIND, "Token rejected");
            AuthError::InvalidToken
        })?;

        let claims = data.claims;
        if claims.actor != A::KIND || claims.typ != kind {
            tracing::warn!(
                expected_actor = %A::KIND,
                presented_actor = %claims.actor,
                "Token presented for the wrong actor type or kind"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(Id::new(claims.sub))
    }

    fn secret<A: Actor>(&self, kind: TokenKind) -> &[u8] {
        let tokens = self.config.tokens::<A>();
        match kind {
            TokenKind::Access => &tokens.access_secret,
            TokenKind::Refresh => &tokens.refresh_secret,
        }
    }

    fn ttl<A: Actor>(&self, kind: TokenKind) -> Duration {
        let tokens = self.config.tokens::<A>();
        match kind {
            TokenKind::Access => tokens.access_ttl,
            TokenKind::Refresh => tokens.refresh_ttl,
        }
    }

    fn sign<A: Actor>(
        &self,
        id: Id<A>,
        kind: TokenKind,
        name: Option<String>,
        email: Option<String>,
    ) -> AuthResult<IssuedToken> {
        let ttl = self.ttl::<A>(kind);
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            sub: id.value(),
            actor: A::KIND,
            typ: kind,
            name,
            email,
            iat: now,
            exp: now.saturating_add(lifetime),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret::<A>(kind)),
        )
        .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))?;

        Ok(IssuedToken { token, ttl })
    }
}
