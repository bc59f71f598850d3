//! Update Profile Use Case

use std::sync::Arc;

use kernel::id::Id;
use kernel::validation::Violations;

use crate::domain::actor::Actor;
use crate::domain::entity::account::{AccountProfile, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    address::Address, contact::Contact, email::Email, handle::Handle,
};
use crate::error::{AuthError, AuthResult};

/// Update profile input; absent fields stay unchanged
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub handle: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute<A: Actor>(
        &self,
        id: Id<A>,
        input: UpdateProfileInput,
    ) -> AuthResult<AccountProfile<A>> {
        let mut violations = Violations::new();
        let changes = ProfileChanges {
            handle: input
                .handle
                .and_then(|h| violations.check("username", Handle::new(&h))),
            email: input
                .email
                .and_then(|e| violations.check("email", Email::new(e))),
            contact: input
                .contact
                .and_then(|c| violations.check("contact", Contact::new(&c))),
            address: input
                .address
                .and_then(|a| violations.check("address", Address::new(&a))),
        };
        violations.into_result()?;

        if changes.is_empty() {
            return Err(AuthError::invalid_field(
                "username",
                "At least one field must be provided",
            ));
        }

        // Handle and email must stay unique within the actor type
        if let Some(handle) = &changes.handle {
            let holder = self.repo.find_by_handle::<A>(handle).await?;
            if holder.is_some_and(|other| other.id() != id) {
                return Err(AuthError::AccountExists);
            }
        }
        if let Some(email) = &changes.email {
            let holder = self.repo.find_by_email::<A>(email).await?;
            if holder.is_some_and(|other| other.id() != id) {
                return Err(AuthError::AccountExists);
            }
        }

        let profile = self
            .repo
            .update_profile::<A>(id, &changes)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        tracing::info!(account_id = %id, actor = %A::KIND, "Profile updated");
        Ok(profile)
    }
}
