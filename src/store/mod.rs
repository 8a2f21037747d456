//! The narrow query interface the auth core talks to.
//!
//! The core never sees SQL. It goes through [`AccountStore`], which is passed in
//! explicitly so tests can swap in [`MemoryStore`]. Concurrency (for example two
//! sign-ups racing on one email) is settled by the store's uniqueness constraint,
//! not by application locks.

use async_trait::async_trait;
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type AccountId = i64;

/// Identity record as read back from the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Stored password-reset request, keyed by its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetRecord {
    pub account_id: AccountId,
    pub created_at: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate key")]
    DuplicateKey,
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            err if is_unique_violation(&err) => Self::DuplicateKey,
            err => Self::Storage(err.into()),
        }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError>;

    /// Insert a new account stamped with `created_at` (UTC epoch seconds).
    async fn insert_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        created_at: i64,
    ) -> Result<AccountId, StoreError>;

    async fn insert_reset_token(
        &self,
        account_id: AccountId,
        token: &str,
        created_at: i64,
    ) -> Result<(), StoreError>;

    async fn find_reset_token(&self, token: &str) -> Result<ResetRecord, StoreError>;

    async fn update_password_hash(
        &self,
        account_id: AccountId,
        password_hash: &str,
    ) -> Result<(), StoreError>;

    async fn delete_reset_token(&self, token: &str) -> Result<(), StoreError>;

    /// Liveness check used by `/api/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
