//! HTTP Handlers
//!
//! One generic set of handlers serves both actor types; the router picks
//! the actor type when it mounts them.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use platform::cookie::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, DeleteAccountUseCase, LoginInput, LoginUseCase,
    LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, LoginUser, MessageResponse,
    ProfileResponse, RefreshRequest, RegisterRequest, TokenResponse, UpdateProfileRequest,
};
use crate::presentation::middleware::CurrentActor;

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: TokenService,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let tokens = TokenService::new(config.clone());
        Self {
            repo,
            config,
            tokens,
        }
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AuthError::invalid_field("body", rejection.body_text()))
}

fn with_token_cookies(jar: CookieJar, config: &AuthConfig, tokens: &TokenPair) -> CookieJar {
    jar.add(config.cookie.build(
        ACCESS_TOKEN_COOKIE,
        tokens.access.token.clone(),
        tokens.access.ttl,
    ))
    .add(config.cookie.build(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh.token.clone(),
        tokens.refresh.ttl,
    ))
}

fn without_token_cookies(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    jar.add(config.cookie.removal(ACCESS_TOKEN_COOKIE))
        .add(config.cookie.removal(REFRESH_TOKEN_COOKIE))
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<A, R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let profile = use_case
        .execute::<A>(RegisterInput {
            handle: req.handle,
            email: req.email,
            contact: req.contact,
            address: req.address,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(&profile))))
}

// ============================================================================
// Login / Logout / Refresh
// ============================================================================

/// POST /login
pub async fn login<A, R>(
    State(state): State<AuthAppState<R>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute::<A>(LoginInput {
            handle: req.handle,
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = with_token_cookies(jar, &state.config, &output.tokens);
    let body = LoginResponse {
        user: LoginUser {
            id: output.profile.id.value(),
            username: output.profile.handle.original().to_string(),
            email: output.profile.email.as_str().to_string(),
        },
        token: output.tokens.access.token,
    };

    Ok((jar, Json(body)))
}

/// POST /logout (gated)
pub async fn logout<A, R>(
    State(state): State<AuthAppState<R>>,
    CurrentActor(profile): CurrentActor<A>,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    LogoutUseCase::new(state.repo.clone())
        .execute::<A>(profile.id)
        .await?;

    Ok((
        without_token_cookies(jar, &state.config),
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

/// POST /refresh-access-token
///
/// The `refreshToken` cookie wins over a `refreshToken` body field.
pub async fn refresh<A, R>(
    State(state): State<AuthAppState<R>>,
    jar: CookieJar,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let from_cookie = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    let presented = match from_cookie {
        Some(token) => Some(token),
        None if body.is_empty() => None,
        None => {
            serde_json::from_slice::<RefreshRequest>(&body)
                .map_err(|_| AuthError::invalid_field("refreshToken", "Malformed request body"))?
                .refresh_token
        }
    };

    let tokens = RefreshUseCase::new(state.repo.clone(), state.tokens.clone())
        .execute::<A>(presented.as_deref())
        .await?;

    let jar = with_token_cookies(jar, &state.config, &tokens);
    Ok((
        jar,
        Json(TokenResponse {
            token: tokens.access.token,
        }),
    ))
}

// ============================================================================
// Profile (gated)
// ============================================================================

/// GET /me
pub async fn me<A>(CurrentActor(profile): CurrentActor<A>) -> Json<ProfileResponse>
where
    A: Actor,
{
    Json(ProfileResponse::from(&profile))
}

/// PATCH /update
pub async fn update_profile<A, R>(
    State(state): State<AuthAppState<R>>,
    CurrentActor(profile): CurrentActor<A>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AuthResult<Json<ProfileResponse>>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let updated = UpdateProfileUseCase::new(state.repo.clone())
        .execute::<A>(
            profile.id,
            UpdateProfileInput {
                handle: req.handle,
                email: req.email,
                contact: req.contact,
                address: req.address,
            },
        )
        .await?;

    Ok(Json(ProfileResponse::from(&updated)))
}

/// PATCH /password
pub async fn change_password<A, R>(
    State(state): State<AuthAppState<R>>,
    CurrentActor(profile): CurrentActor<A>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let req = json_body(body)?;
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute::<A>(
            profile.id,
            ChangePasswordInput {
                old_password: req.old_password,
                new_password: req.new_password,
                confirm_new_password: req.confirm_new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}

/// DELETE /
pub async fn delete_account<A, R>(
    State(state): State<AuthAppState<R>>,
    CurrentActor(profile): CurrentActor<A>,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse>
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    DeleteAccountUseCase::new(state.repo.clone())
        .execute::<A>(profile.id)
        .await?;

    Ok((StatusCode::NO_CONTENT, without_token_cookies(jar, &state.config)))
}
