//! Account Entity
//!
//! One shape for both actor types. [`AccountProfile`] is the public view the
//! session gate attaches to requests; it never carries the password hash or
//! the refresh token.

use chrono::{DateTime, Utc};
use kernel::id::Id;

use crate::domain::actor::Actor;
use crate::domain::value_object::{
    address::Address, contact::Contact, email::Email, handle::Handle,
    user_password::UserPassword,
};

/// Public account profile
#[derive(Debug, Clone)]
pub struct AccountProfile<A: Actor> {
    pub id: Id<A>,
    pub handle: Handle,
    pub email: Email,
    pub contact: Contact,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account with credentials, only loaded when a password must be checked
#[derive(Debug, Clone)]
pub struct Account<A: Actor> {
    pub profile: AccountProfile<A>,
    pub password: UserPassword,
}

impl<A: Actor> Account<A> {
    pub fn id(&self) -> Id<A> {
        self.profile.id
    }
}

/// Validated registration data
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub handle: Handle,
    pub email: Email,
    pub contact: Contact,
    pub address: Address,
    pub password: UserPassword,
}

/// Partial profile update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub handle: Option<Handle>,
    pub email: Option<Email>,
    pub contact: Option<Contact>,
    pub address: Option<Address>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
            && self.email.is_none()
            && self.contact.is_none()
            && self.address.is_none()
    }

    /// Apply the changes to a profile in place
    pub fn apply_to<A: Actor>(&self, profile: &mut AccountProfile<A>) {
        if let Some(handle) = &self.handle {
            profile.handle = handle.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(contact) = &self.contact {
            profile.contact = contact.clone();
        }
        if let Some(address) = &self.address {
            profile.address = address.clone();
        }
        profile.updated_at = Utc::now();
    }
}
