//! Change Password Use Case
//!
//! A successful change also clears the stored refresh token, which signs
//! out every other session.

use std::sync::Arc;

use kernel::id::Id;
use kernel::validation::Violations;

use crate::application::config::AuthConfig;
use crate::domain::actor::Actor;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute<A: Actor>(&self, id: Id<A>, input: ChangePasswordInput) -> AuthResult<()> {
        let mut violations = Violations::new();
        let new_password = violations.check("newPassword", RawPassword::new(input.new_password));
        if let Some(new_password) = &new_password {
            let confirmed = RawPassword::for_verification(input.confirm_new_password)
                .is_some_and(|confirm| new_password.matches(&confirm));
            if !confirmed {
                violations.add("confirmNewPassword", "Passwords do not match");
            }
        }
        let Some(new_password) = new_password else {
            return Err(violations.into_error().into());
        };
        violations.into_result()?;

        let account = self
            .repo
            .find_by_id::<A>(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let old_matches = RawPassword::for_verification(input.old_password)
            .is_some_and(|old| account.password.verify(&old, self.config.pepper()));
        if !old_matches {
            return Err(AuthError::invalid_field(
                "oldPassword",
                "Old password is incorrect",
            ));
        }

        let hashed = UserPassword::from_raw(&new_password, self.config.pepper())?;
        self.repo.update_password::<A>(id, &hashed).await?;

        tracing::info!(account_id = %id, actor = %A::KIND, "Password changed");
        Ok(())
    }
}
