//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer. Every method is generic over the actor type, so a
//! single store serves both learner and administrator accounts.

use kernel::id::Id;

use crate::domain::actor::Actor;
use crate::domain::entity::account::{Account, AccountProfile, NewAccount, ProfileChanges};
use crate::domain::value_object::{email::Email, handle::Handle, user_password::UserPassword};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account with an empty refresh token
    ///
    /// A concurrent duplicate handle or email fails with `AccountExists`.
    async fn create<A: Actor>(&self, account: &NewAccount) -> AuthResult<AccountProfile<A>>;

    /// Find account with credentials by ID
    async fn find_by_id<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<Account<A>>>;

    /// Find the public profile by ID (no password, no refresh token)
    async fn find_profile<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<AccountProfile<A>>>;

    /// Find account by canonical handle
    async fn find_by_handle<A: Actor>(&self, handle: &Handle) -> AuthResult<Option<Account<A>>>;

    /// Find account by email
    async fn find_by_email<A: Actor>(&self, email: &Email) -> AuthResult<Option<Account<A>>>;

    /// Apply a partial profile update, returning the new profile
    async fn update_profile<A: Actor>(
        &self,
        id: Id<A>,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<AccountProfile<A>>>;

    /// Replace the password hash and clear the stored refresh token
    async fn update_password<A: Actor>(&self, id: Id<A>, password: &UserPassword)
    -> AuthResult<()>;

    /// Delete the account; `false` if it did not exist
    async fn delete<A: Actor>(&self, id: Id<A>) -> AuthResult<bool>;

    /// Unconditionally store a refresh token (login)
    async fn store_refresh_token<A: Actor>(&self, id: Id<A>, token: &str) -> AuthResult<()>;

    /// Atomically replace `presented` with `replacement`
    ///
    /// Returns `false` when the stored token is not byte-for-byte equal to
    /// `presented`: rotated by a concurrent refresh, cleared by logout, or
    /// never issued. Compare and write must happen as one step.
    async fn rotate_refresh_token<A: Actor>(
        &self,
        id: Id<A>,
        presented: &str,
        replacement: &str,
    ) -> AuthResult<bool>;

    /// Clear the stored refresh token to the empty value (logout)
    async fn clear_refresh_token<A: Actor>(&self, id: Id<A>) -> AuthResult<()>;
}
