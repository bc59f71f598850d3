//! In-memory Repository Implementation
//!
//! Backs tests and local experiments. One lock guards every table, so each
//! method is atomic, including the refresh-token compare-and-swap.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::Id;
use tokio::sync::Mutex;

use crate::domain::actor::{Actor, ActorKind};
use crate::domain::entity::account::{Account, AccountProfile, NewAccount, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    address::Address, contact::Contact, email::Email, handle::Handle,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
struct StoredAccount {
    handle: Handle,
    email: Email,
    contact: Contact,
    address: Address,
    password: UserPassword,
    refresh_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredAccount {
    fn profile<A: Actor>(&self, id: i64) -> AccountProfile<A> {
        AccountProfile {
            id: Id::new(id),
            handle: self.handle.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            address: self.address.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn account<A: Actor>(&self, id: i64) -> Account<A> {
        Account {
            profile: self.profile(id),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    accounts: HashMap<ActorKind, HashMap<i64, StoredAccount>>,
}

impl Tables {
    fn table<A: Actor>(&mut self) -> &mut HashMap<i64, StoredAccount> {
        self.accounts.entry(A::KIND).or_default()
    }
}

/// In-memory account repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    inner: Arc<Mutex<Tables>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored refresh token, for assertions
    pub async fn stored_refresh_token<A: Actor>(&self, id: Id<A>) -> Option<String> {
        let mut tables = self.inner.lock().await;
        tables
            .table::<A>()
            .get(&id.value())
            .map(|stored| stored.refresh_token.clone())
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create<A: Actor>(&self, account: &NewAccount) -> AuthResult<AccountProfile<A>> {
        let mut tables = self.inner.lock().await;
        let taken = tables.table::<A>().values().any(|stored| {
            stored.handle.canonical() == account.handle.canonical()
                || stored.email == account.email
        });
        if taken {
            return Err(AuthError::AccountExists);
        }

        tables.next_id += 1;
        let id = tables.next_id;
        let now = Utc::now();
        let stored = StoredAccount {
            handle: account.handle.clone(),
            email: account.email.clone(),
            contact: account.contact.clone(),
            address: account.address.clone(),
            password: account.password.clone(),
            refresh_token: String::new(),
            created_at: now,
            updated_at: now,
        };
        let profile = stored.profile(id);
        tables.table::<A>().insert(id, stored);

        Ok(profile)
    }

    async fn find_by_id<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<Account<A>>> {
        let mut tables = self.inner.lock().await;
        Ok(tables
            .table::<A>()
            .get(&id.value())
            .map(|stored| stored.account(id.value())))
    }

    async fn find_profile<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<AccountProfile<A>>> {
        let mut tables = self.inner.lock().await;
        Ok(tables
            .table::<A>()
            .get(&id.value())
            .map(|stored| stored.profile(id.value())))
    }

    async fn find_by_handle<A: Actor>(&self, handle: &Handle) -> AuthResult<Option<Account<A>>> {
        let mut tables = self.inner.lock().await;
        Ok(tables
            .table::<A>()
            .iter()
            .find(|(_, stored)| stored.handle.canonical() == handle.canonical())
            .map(|(id, stored)| stored.account(*id)))
    }

    async fn find_by_email<A: Actor>(&self, email: &Email) -> AuthResult<Option<Account<A>>> {
        let mut tables = self.inner.lock().await;
        Ok(tables
            .table::<A>()
            .iter()
            .find(|(_, stored)| &stored.email == email)
            .map(|(id, stored)| stored.account(*id)))
    }

    async fn update_profile<A: Actor>(
        &self,
        id: Id<A>,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<AccountProfile<A>>> {
        let mut tables = self.inner.lock().await;
        let table = tables.table::<A>();

        let clash = table.iter().any(|(other, stored)| {
            *other != id.value()
                && (changes
                    .handle
                    .as_ref()
                    .is_some_and(|h| h.canonical() == stored.handle.canonical())
                    || changes.email.as_ref().is_some_and(|e| e == &stored.email))
        });
        if clash {
            return Err(AuthError::AccountExists);
        }

        let Some(stored) = table.get_mut(&id.value()) else {
            return Ok(None);
        };
        let mut profile = stored.profile::<A>(id.value());
        changes.apply_to(&mut profile);
        stored.handle = profile.handle.clone();
        stored.email = profile.email.clone();
        stored.contact = profile.contact.clone();
        stored.address = profile.address.clone();
        stored.updated_at = profile.updated_at;

        Ok(Some(profile))
    }

    async fn update_password<A: Actor>(
        &self,
        id: Id<A>,
        password: &UserPassword,
    ) -> AuthResult<()> {
        let mut tables = self.inner.lock().await;
        if let Some(stored) = tables.table::<A>().get_mut(&id.value()) {
            stored.password = password.clone();
            stored.refresh_token.clear();
            stored.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete<A: Actor>(&self, id: Id<A>) -> AuthResult<bool> {
        let mut tables = self.inner.lock().await;
        Ok(tables.table::<A>().remove(&id.value()).is_some())
    }

    async fn store_refresh_token<A: Actor>(&self, id: Id<A>, token: &str) -> AuthResult<()> {
        let mut tables = self.inner.lock().await;
        if let Some(stored) = tables.table::<A>().get_mut(&id.value()) {
            stored.refresh_token = token.to_string();
            stored.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rotate_refresh_token<A: Actor>(
        &self,
        id: Id<A>,
        presented: &str,
        replacement: &str,
    ) -> AuthResult<bool> {
        let mut tables = self.inner.lock().await;
        match tables.table::<A>().get_mut(&id.value()) {
            Some(stored) if !stored.refresh_token.is_empty() && stored.refresh_token == presented => {
                stored.refresh_token = replacement.to_string();
                stored.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_refresh_token<A: Actor>(&self, id: Id<A>) -> AuthResult<()> {
        let mut tables = self.inner.lock().await;
        if let Some(stored) = tables.table::<A>().get_mut(&id.value()) {
            stored.refresh_token.clear();
            stored.updated_at = Utc::now();
        }
        Ok(())
    }
}
