//! Logout Use Case

use std::sync::Arc;

use kernel::id::Id;

use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;

/// Logout use case
///
/// Clears the stored refresh token. Outstanding access tokens stay valid
/// until they expire.
pub struct LogoutUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute<A: Actor>(&self, id: Id<A>) -> AuthResult<()> {
        self.repo.clear_refresh_token::<A>(id).await?;
        tracing::info!(account_id = %id, actor = %A::KIND, "Logged out");
        Ok(())
    }
}
