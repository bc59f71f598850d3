//! Login Use Case
//!
//! Verifies credentials and issues a fresh token pair. The refresh token is
//! stored on the account, so a second login invalidates the previous
//! session's refresh token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::actor::Actor;
use crate::domain::entity::account::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    handle::Handle,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input; exactly one of `handle` or `email` must be given
pub struct LoginInput {
    pub handle: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Login output
pub struct LoginOutput<A: Actor> {
    pub profile: AccountProfile<A>,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: TokenService,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: TokenService) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute<A: Actor>(&self, input: LoginInput) -> AuthResult<LoginOutput<A>> {
        let handle = input.handle.filter(|h| !h.trim().is_empty());
        let email = input.email.filter(|e| !e.trim().is_empty());

        let account = match (handle, email) {
            (Some(handle), None) => match Handle::new(&handle) {
                Ok(handle) => self.repo.find_by_handle::<A>(&handle).await?,
                Err(_) => None,
            },
            (None, Some(email)) => match Email::new(email) {
                Ok(email) => self.repo.find_by_email::<A>(&email).await?,
                Err(_) => None,
            },
            (None, None) => {
                return Err(AuthError::invalid_field(
                    "username",
                    "Username or email is required",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(AuthError::invalid_field(
                    "username",
                    "Provide either username or email, not both",
                ));
            }
        };

        let account = account.ok_or(AuthError::InvalidCredentials)?;
        let password =
            RawPassword::for_verification(input.password).ok_or(AuthError::InvalidCredentials)?;

        if !account.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Opportunistic upgrade of outdated hash parameters
        if account.password.needs_rehash() {
            let upgraded = UserPassword::from_raw(&password, self.config.pepper())?;
            self.repo
                .update_password::<A>(account.id(), &upgraded)
                .await?;
            tracing::info!(account_id = %account.id(), "Password hash upgraded");
        }

        let tokens = self.tokens.issue_pair(&account.profile)?;
        self.repo
            .store_refresh_token::<A>(account.id(), &tokens.refresh.token)
            .await?;

        tracing::info!(
            account_id = %account.id(),
            actor = %A::KIND,
            "Login succeeded"
        );

        Ok(LoginOutput {
            profile: account.profile,
            tokens,
        })
    }
}
