//! Session Middleware
//!
//! Gates routes on a verified access token. The token is read from the
//! `accessToken` cookie first, then from `Authorization: Bearer`. On success
//! the caller's public profile is attached to the request extensions, where
//! handlers pick it up through [`CurrentActor`] or [`AuthenticatedActor`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::markers::{Administrator, Learner};
use platform::bearer::extract_bearer;
use platform::cookie::{ACCESS_TOKEN_COOKIE, extract_cookie};

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::CheckSessionUseCase;
use crate::domain::actor::Actor;
use crate::domain::entity::account::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Gate state shared by every gated router
pub struct SessionGate<R> {
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> Clone for SessionGate<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> SessionGate<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens: TokenService::new(config),
        }
    }

    /// Resolve the caller as actor type `A`
    pub async fn authenticate<A: Actor>(&self, headers: &HeaderMap) -> AuthResult<AccountProfile<A>> {
        let token = presented_access_token(headers);
        CheckSessionUseCase::new(self.repo.clone(), self.tokens.clone())
            .execute::<A>(token.as_deref())
            .await
    }
}

/// Access token from the cookie, falling back to the bearer header
pub fn presented_access_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, ACCESS_TOKEN_COOKIE).or_else(|| extract_bearer(headers))
}

/// Middleware that requires a valid access token for actor type `A`
pub async fn require_actor<A, R>(
    State(gate): State<SessionGate<R>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let (mut parts, body) = req.into_parts();
    let profile = gate.authenticate::<A>(&parts.headers).await?;
    parts.extensions.insert(profile);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Middleware that accepts either actor type
///
/// The learner check runs first. When both fail, the administrator
/// failure is reported.
pub async fn require_any_actor<R>(
    State(gate): State<SessionGate<R>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let (mut parts, body) = req.into_parts();
    let actor = match gate.authenticate::<Learner>(&parts.headers).await {
        Ok(profile) => AuthenticatedActor::Learner(profile),
        Err(_) => AuthenticatedActor::Administrator(
            gate.authenticate::<Administrator>(&parts.headers).await?,
        ),
    };

    parts.extensions.insert(actor);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

// ============================================================================
// Extractors
// ============================================================================

/// Profile attached by [`require_actor`]
#[derive(Debug, Clone)]
pub struct CurrentActor<A: Actor>(pub AccountProfile<A>);

impl<A, S> FromRequestParts<S> for CurrentActor<A>
where
    A: Actor,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccountProfile<A>>()
            .cloned()
            .map(CurrentActor)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Profile attached by [`require_any_actor`]
#[derive(Debug, Clone)]
pub enum AuthenticatedActor {
    Learner(AccountProfile<Learner>),
    Administrator(AccountProfile<Administrator>),
}

impl<S> FromRequestParts<S> for AuthenticatedActor
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedActor>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}
