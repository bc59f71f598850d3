//! Refresh Use Case
//!
//! Exchanges a refresh token for a new token pair. The stored token is
//! replaced with a compare-and-swap, so of two concurrent refreshes with
//! the same token at most one wins. A lost race, a logged-out session and
//! an expired token are indistinguishable to the caller.

use std::sync::Arc;

use crate::application::token::{TokenKind, TokenPair, TokenService};
use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> RefreshUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute<A: Actor>(&self, presented: Option<&str>) -> AuthResult<TokenPair> {
        let presented = presented
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthorized)?;
        let id = self.tokens.verify::<A>(presented, TokenKind::Refresh)?;

        let profile = self
            .repo
            .find_profile::<A>(id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let tokens = self.tokens.issue_pair(&profile)?;

        let rotated = self
            .repo
            .rotate_refresh_token::<A>(id, presented, &tokens.refresh.token)
            .await?;
        if !rotated {
            tracing::warn!(
                account_id = %id,
                actor = %A::KIND,
                "Refresh token does not match the stored token"
            );
            return Err(AuthError::InvalidToken);
        }

        tracing::debug!(account_id = %id, actor = %A::KIND, "Tokens refreshed");
        Ok(tokens)
    }
}
