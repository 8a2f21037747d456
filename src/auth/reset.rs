//! Single-use password-reset tokens.
//!
//! Tokens share the session token format but live in their own store table and
//! are looked up by exact value. Expiry is checked when a token is used; nothing
//! sweeps old rows.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::{clock::Clock, error::AuthError, token::generate_token};
use crate::store::{AccountId, AccountStore, ResetRecord, StoreError};

pub const DEFAULT_RESET_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct ResetTokenManager {
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
    ttl_seconds: i64,
}

impl ResetTokenManager {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl_seconds: DEFAULT_RESET_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    /// Create and persist a reset token for `account_id`.
    ///
    /// # Errors
    /// Returns the store error if the record cannot be written.
    pub async fn issue(&self, account_id: AccountId) -> Result<String, StoreError> {
        let created_at = self.clock.now_unix();
        let token = generate_token(account_id, created_at);
        self.store
            .insert_reset_token(account_id, &token, created_at)
            .await?;
        Ok(token)
    }

    /// Look a token up by exact value.
    ///
    /// # Errors
    /// [`AuthError::InvalidToken`] when the token is unknown or its stored
    /// timestamp is unusable, [`AuthError::Storage`] for anything else.
    pub async fn resolve(&self, token: &str) -> Result<ResetRecord, AuthError> {
        match self.store.find_reset_token(token).await {
            Ok(record) if record.created_at < 0 => {
                error!(
                    created_at = record.created_at,
                    "Reset token has an invalid timestamp"
                );
                Err(AuthError::InvalidToken)
            }
            Ok(record) => Ok(record),
            Err(StoreError::NotFound) => {
                debug!("Reset token not found");
                Err(AuthError::InvalidToken)
            }
            Err(err) => Err(AuthError::Storage(err)),
        }
    }

    /// True once `ttl` seconds have passed since `created_at`.
    #[must_use]
    pub fn is_expired(&self, created_at: i64) -> bool {
        self.clock.now_unix() >= created_at.saturating_add(self.ttl_seconds)
    }

    /// Delete a used token. Failures are logged, never returned: the password
    /// change has already committed and a leftover row still expires.
    pub async fn consume(&self, token: &str) {
        if let Err(err) = self.store.delete_reset_token(token).await {
            warn!("Failed to delete reset token: {err}");
        }
    }
}

impl std::fmt::Debug for ResetTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetTokenManager")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
