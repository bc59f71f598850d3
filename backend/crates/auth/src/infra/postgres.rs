//! PostgreSQL Repository Implementation
//!
//! Learners and administrators live in two tables with the same shape;
//! every query takes its table name from [`Actor::TABLE`].

use chrono::{DateTime, Utc};
use kernel::error::conversions::DatabaseErrorExt;
use kernel::id::Id;
use sqlx::PgPool;

use crate::domain::actor::Actor;
use crate::domain::entity::account::{Account, AccountProfile, NewAccount, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    address::Address, contact::Contact, email::Email, handle::Handle,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const PROFILE_COLUMNS: &str =
    "id, handle, handle_canonical, email, contact, address, created_at, updated_at";

const ACCOUNT_COLUMNS: &str =
    "id, handle, handle_canonical, email, contact, address, created_at, updated_at, password_hash";

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_account_where<A: Actor>(
        &self,
        column: &str,
        value: &str,
    ) -> AuthResult<Option<Account<A>>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM {} WHERE {column} = $1",
            A::TABLE
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }
}

fn map_unique(err: sqlx::Error) -> AuthError {
    if err.is_unique_violation() {
        AuthError::AccountExists
    } else {
        AuthError::Database(err)
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create<A: Actor>(&self, account: &NewAccount) -> AuthResult<AccountProfile<A>> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                handle,
                handle_canonical,
                email,
                contact,
                address,
                password_hash
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROFILE_COLUMNS}
            "#,
            A::TABLE
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(account.handle.original())
            .bind(account.handle.canonical())
            .bind(account.email.as_str())
            .bind(account.contact.as_str())
            .bind(account.address.as_str())
            .bind(account.password.as_phc_string())
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique)?;

        Ok(row.into_profile())
    }

    async fn find_by_id<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<Account<A>>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM {} WHERE id = $1", A::TABLE);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_profile<A: Actor>(&self, id: Id<A>) -> AuthResult<Option<AccountProfile<A>>> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM {} WHERE id = $1", A::TABLE);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn find_by_handle<A: Actor>(&self, handle: &Handle) -> AuthResult<Option<Account<A>>> {
        self.find_account_where::<A>("handle_canonical", handle.canonical())
            .await
    }

    async fn find_by_email<A: Actor>(&self, email: &Email) -> AuthResult<Option<Account<A>>> {
        self.find_account_where::<A>("email", email.as_str()).await
    }

    async fn update_profile<A: Actor>(
        &self,
        id: Id<A>,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<AccountProfile<A>>> {
        let sql = format!(
            r#"
            UPDATE {}
            SET handle = COALESCE($2, handle),
                handle_canonical = COALESCE($3, handle_canonical),
                email = COALESCE($4, email),
                contact = COALESCE($5, contact),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
            A::TABLE
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id.value())
            .bind(changes.handle.as_ref().map(|h| h.original()))
            .bind(changes.handle.as_ref().map(|h| h.canonical()))
            .bind(changes.email.as_ref().map(|e| e.as_str()))
            .bind(changes.contact.as_ref().map(|c| c.as_str()))
            .bind(changes.address.as_ref().map(|a| a.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique)?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update_password<A: Actor>(
        &self,
        id: Id<A>,
        password: &UserPassword,
    ) -> AuthResult<()> {
        let sql = format!(
            "UPDATE {} SET password_hash = $2, refresh_token = '', updated_at = NOW() WHERE id = $1",
            A::TABLE
        );
        sqlx::query(&sql)
            .bind(id.value())
            .bind(password.as_phc_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete<A: Actor>(&self, id: Id<A>) -> AuthResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", A::TABLE);
        let result = sqlx::query(&sql)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    AuthError::AccountInUse
                } else {
                    AuthError::Database(e)
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn store_refresh_token<A: Actor>(&self, id: Id<A>, token: &str) -> AuthResult<()> {
        let sql = format!(
            "UPDATE {} SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
            A::TABLE
        );
        sqlx::query(&sql)
            .bind(id.value())
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn rotate_refresh_token<A: Actor>(
        &self,
        id: Id<A>,
        presented: &str,
        replacement: &str,
    ) -> AuthResult<bool> {
        // Compare and write in one statement; the empty value never matches
        // because an empty token is rejected before reaching storage.
        let sql = format!(
            r#"
            UPDATE {}
            SET refresh_token = $3, updated_at = NOW()
            WHERE id = $1 AND refresh_token = $2 AND refresh_token <> ''
            "#,
            A::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(id.value())
            .bind(presented)
            .bind(replacement)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_refresh_token<A: Actor>(&self, id: Id<A>) -> AuthResult<()> {
        let sql = format!(
            "UPDATE {} SET refresh_token = '', updated_at = NOW() WHERE id = $1",
            A::TABLE
        );
        sqlx::query(&sql)
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    handle: String,
    handle_canonical: String,
    email: String,
    contact: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile<A: Actor>(self) -> AccountProfile<A> {
        AccountProfile {
            id: Id::new(self.id),
            handle: Handle::from_db(self.handle, self.handle_canonical),
            email: Email::from_db(self.email),
            contact: Contact::from_db(self.contact),
            address: Address::from_db(self.address),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    password_hash: String,
}

impl AccountRow {
    fn into_account<A: Actor>(self) -> AuthResult<Account<A>> {
        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.message().to_string()))?;

        Ok(Account {
            profile: self.profile.into_profile(),
            password,
        })
    }
}
