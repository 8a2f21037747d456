//! In-process [`AccountStore`] for tests and throwaway local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Account, AccountId, AccountStore, ResetRecord, StoreError};

#[derive(Debug, Default)]
struct Tables {
    next_id: AccountId,
    accounts: HashMap<AccountId, Account>,
    resets: HashMap<String, ResetRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_reset_deletes: AtomicBool,
    fail_reset_inserts: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `delete_reset_token` call fail with a storage error.
    pub fn fail_reset_deletes(&self, fail: bool) {
        self.fail_reset_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make every `insert_reset_token` call fail with a storage error.
    pub fn fail_reset_inserts(&self, fail: bool) {
        self.fail_reset_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of reset records currently held, expired ones included.
    pub async fn reset_count(&self) -> usize {
        self.tables.read().await.resets.len()
    }

    pub async fn account_by_id(&self, account_id: AccountId) -> Option<Account> {
        self.tables.read().await.accounts.get(&account_id).cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError> {
        self.tables
            .read()
            .await
            .accounts
            .values()
            .find(|account| account.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        created_at: i64,
    ) -> Result<AccountId, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.accounts.values().any(|account| account.email == email) {
            return Err(StoreError::DuplicateKey);
        }
        tables.next_id += 1;
        let id = tables.next_id;
        tables.accounts.insert(
            id,
            Account {
                id,
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at,
            },
        );
        Ok(id)
    }

    async fn insert_reset_token(
        &self,
        account_id: AccountId,
        token: &str,
        created_at: i64,
    ) -> Result<(), StoreError> {
        if self.fail_reset_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Storage(anyhow!("reset insert disabled")));
        }
        self.tables.write().await.resets.insert(
            token.to_string(),
            ResetRecord {
                account_id,
                created_at,
            },
        );
        Ok(())
    }

    async fn find_reset_token(&self, token: &str) -> Result<ResetRecord, StoreError> {
        self.tables
            .read()
            .await
            .resets
            .get(token)
            .copied()
            .ok_or(StoreError::NotFound)
    }

    async fn update_password_hash(
        &self,
        account_id: AccountId,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let account = tables
            .accounts
            .get_mut(&account_id)
            .ok_or(StoreError::NotFound)?;
        account.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete_reset_token(&self, token: &str) -> Result<(), StoreError> {
        if self.fail_reset_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Storage(anyhow!("reset delete disabled")));
        }
        self.tables.write().await.resets.remove(token);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> Result<()> {
        let store = MemoryStore::new();
        let first = store.insert_account("A", "a@x.com", "h", 10).await?;
        assert_eq!(first, 1);
        assert_eq!(store.account_by_id(first).await.map(|a| a.created_at), Some(10));
        assert!(matches!(
            store.insert_account("B", "a@x.com", "h", 11).await,
            Err(StoreError::DuplicateKey)
        ));
        // Email match is case sensitive, as stored.
        assert_eq!(store.insert_account("C", "A@x.com", "h", 12).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn reset_records_round_trip() -> Result<()> {
        let store = MemoryStore::new();
        store.insert_reset_token(3, "tok", 100).await?;
        assert_eq!(
            store.find_reset_token("tok").await?,
            ResetRecord {
                account_id: 3,
                created_at: 100
            }
        );
        store.delete_reset_token("tok").await?;
        assert!(matches!(
            store.find_reset_token("tok").await,
            Err(StoreError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_account_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update_password_hash(99, "h").await,
            Err(StoreError::NotFound)
        ));
    }
}
