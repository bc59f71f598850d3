//! Check Session Use Case
//!
//! Resolves a presented access token to the caller's current public
//! profile. Never mutates state.

use std::sync::Arc;

use crate::application::token::{TokenKind, TokenService};
use crate::domain::actor::Actor;
use crate::domain::entity::account::AccountProfile;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> CheckSessionUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    /// - no token → `Unauthorized`
    /// - token fails verification → `InvalidToken`
    /// - account gone → `InvalidToken`
    pub async fn execute<A: Actor>(&self, token: Option<&str>) -> AuthResult<AccountProfile<A>> {
        let token = token.ok_or(AuthError::Unauthorized)?;
        let id = self.tokens.verify::<A>(token, TokenKind::Access)?;

        self.repo
            .find_profile::<A>(id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
