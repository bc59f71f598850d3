//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use kernel::id::markers::{Administrator, Learner};

use crate::application::config::AuthConfig;
use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{SessionGate, require_actor};

/// Account routes for actor type `A`
///
/// `register`, `login`, and `refresh-access-token` are public; the rest sit
/// behind the session gate for `A`.
pub fn account_router<A, R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    A: Actor,
    R: AccountRepository + Send + Sync + 'static,
{
    let gate = SessionGate::new(repo.clone(), config.clone());
    let state = AuthAppState::new(repo, config);

    let gated = Router::new()
        .route("/logout", post(handlers::logout::<A, R>))
        .route("/me", get(handlers::me::<A>))
        .route("/update", patch(handlers::update_profile::<A, R>))
        .route("/password", patch(handlers::change_password::<A, R>))
        .route("/", delete(handlers::delete_account::<A, R>))
        .route_layer(middleware::from_fn_with_state(gate, require_actor::<A, R>));

    Router::new()
        .route("/register", post(handlers::register::<A, R>))
        .route("/login", post(handlers::login::<A, R>))
        .route(
            "/refresh-access-token",
            post(handlers::refresh::<A, R>),
        )
        .merge(gated)
        .with_state(state)
}

/// Learner account routes, mounted at `/users`
pub fn learner_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    account_router::<Learner, R>(repo, config)
}

/// Administrator account routes, mounted at `/admin`
pub fn admin_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    account_router::<Administrator, R>(repo, config)
}
