//! Delete Account Use Case

use std::sync::Arc;

use kernel::id::Id;

use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Delete account use case
///
/// Accounts that still own courses or payments are refused with
/// `AccountInUse` by the repository.
pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute<A: Actor>(&self, id: Id<A>) -> AuthResult<()> {
        if !self.repo.delete::<A>(id).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(account_id = %id, actor = %A::KIND, "Account deleted");
        Ok(())
    }
}
