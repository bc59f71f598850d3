//! Register Use Case
//!
//! Creates a new account for either actor type.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::application::config::AuthConfig;
use crate::domain::actor::Actor;
use crate::domain::entity::account::{AccountProfile, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    address::Address,
    contact::Contact,
    email::Email,
    handle::Handle,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub handle: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute<A: Actor>(&self, input: RegisterInput) -> AuthResult<AccountProfile<A>> {
        let mut violations = Violations::new();
        let handle = violations.check("username", Handle::new(&input.handle));
        let email = violations.check("email", Email::new(input.email));
        let contact = violations.check("contact", Contact::new(&input.contact));
        let address = violations.check("address", Address::new(&input.address));
        let password = violations.check("password", RawPassword::new(input.password));

        if let Some(password) = &password {
            let confirmed = RawPassword::for_verification(input.confirm_password)
                .is_some_and(|confirm| password.matches(&confirm));
            if !confirmed {
                violations.add("confirmPassword", "Passwords do not match");
            }
        }

        let (Some(handle), Some(email), Some(contact), Some(address), Some(password)) =
            (handle, email, contact, address, password)
        else {
            return Err(violations.into_error().into());
        };
        violations.into_result()?;

        // Check if handle or email is taken
        if self.repo.find_by_handle::<A>(&handle).await?.is_some()
            || self.repo.find_by_email::<A>(&email).await?.is_some()
        {
            return Err(AuthError::AccountExists);
        }

        let password = UserPassword::from_raw(&password, self.config.pepper())?;

        let profile = self
            .repo
            .create::<A>(&NewAccount {
                handle,
                email,
                contact,
                address,
                password,
            })
            .await?;

        tracing::info!(
            account_id = %profile.id,
            actor = %A::KIND,
            handle = %profile.handle,
            "Account registered"
        );

        Ok(profile)
    }
}
