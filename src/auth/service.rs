//! Sign-up, sign-in, forgot-password and reset-password.
//!
//! Flow Overview:
//! - sign-up: presence + email shape → hash → insert account.
//! - sign-in: lookup by email → verify → mint session token. Unknown email and
//!   wrong password are indistinguishable, in body and in cost.
//! - forgot-password: lookup → issue reset token → notify. The response is the same
//!   whether or not the account exists.
//! - reset-password: resolve → expiry check → hash → update password → consume.
//!   The password update always commits before the token is deleted; a crash in
//!   between leaves a token that still expires on its own.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use super::{
    clock::Clock,
    error::AuthError,
    hasher,
    notifier::ResetNotifier,
    reset::{ResetTokenManager, DEFAULT_RESET_TTL_SECONDS},
    token::{SessionClaims, TokenCodec, DEFAULT_SESSION_TTL_SECONDS},
};
use crate::store::{Account, AccountId, AccountStore, StoreError};

pub const SIGNUP_MESSAGE: &str = "User created successfully";
pub const SIGNIN_MESSAGE: &str = "Sign-In successful";
pub const FORGOT_PASSWORD_MESSAGE: &str = "If the email is valid, you will receive a reset link.";
pub const RESET_PASSWORD_MESSAGE: &str = "Password has been successfully reset.";

#[derive(Clone, Copy, Debug)]
pub struct AuthConfig {
    session_ttl_seconds: i64,
    reset_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            reset_ttl_seconds: DEFAULT_RESET_TTL_SECONDS,
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_reset_ttl_seconds(mut self, seconds: i64) -> Self {
        self.reset_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn reset_ttl_seconds(&self) -> i64 {
        self.reset_ttl_seconds
    }
}

/// Account fields that may leave the service. Never carries the hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PublicAccount {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

#[derive(Debug)]
pub struct SignIn {
    pub token: String,
    pub account: PublicAccount,
}

// Presence only; values are stored exactly as given.
fn present(value: &str) -> bool {
    !value.is_empty()
}

pub struct AuthService {
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
    tokens: TokenCodec,
    resets: ResetTokenManager,
    notifier: Arc<dyn ResetNotifier>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        store: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ResetNotifier>,
        config: AuthConfig,
    ) -> Self {
        let tokens =
            TokenCodec::new(clock.clone()).with_ttl_seconds(config.session_ttl_seconds());
        let resets = ResetTokenManager::new(store.clone(), clock.clone())
            .with_ttl_seconds(config.reset_ttl_seconds());
        Self {
            store,
            clock,
            tokens,
            resets,
            notifier,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Register a new account.
    ///
    /// # Errors
    /// `Validation` for missing fields, `DuplicateAccount`
    /// when the email is taken, `Hash`/`Storage` for internal failures.
    #[instrument(skip_all)]
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: SecretString,
    ) -> Result<AccountId, AuthError> {
        if !present(name) || !present(email) || password.expose_secret().is_empty() {
            return Err(AuthError::Validation(
                "All fields (name, email, password) are required",
            ));
        }

        let password_hash = hasher::hash_blocking(password).await?;

        let created_at = self.clock.now_unix();
        match self
            .store
            .insert_account(name, email, &password_hash, created_at)
            .await
        {
            Ok(account_id) => {
                info!(account_id, "Account created");
                Ok(account_id)
            }
            Err(StoreError::DuplicateKey) => {
                debug!("Sign-up for an email that already exists");
                Err(AuthError::DuplicateAccount)
            }
            Err(err) => Err(AuthError::Storage(err)),
        }
    }

    /// Check credentials and mint a session token.
    ///
    /// # Errors
    /// `Validation` for missing fields, `InvalidCredentials` for anything else.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, email: &str, password: SecretString) -> Result<SignIn, AuthError> {
        if !present(email) || password.expose_secret().is_empty() {
            return Err(AuthError::Validation("Email and password are required"));
        }

        let account = match self.store.find_account_by_email(email).await {
            Ok(account) => Some(account),
            Err(StoreError::NotFound) => None,
            Err(err) => {
                error!("Failed to fetch account: {err}");
                None
            }
        };

        let stored_hash = account.as_ref().map(|account| account.password_hash.clone());
        let verified = hasher::verify_blocking(password, stored_hash).await;

        let Some(account) = account.filter(|_| verified) else {
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.tokens.issue(account.id);
        info!(account_id = account.id, "Sign-in succeeded");

        Ok(SignIn {
            token,
            account: account.into(),
        })
    }

    /// Start password recovery. Succeeds for unknown emails too.
    ///
    /// # Errors
    /// Only `Validation` when the email is missing.
    #[instrument(skip_all)]
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        if !present(email) {
            return Err(AuthError::Validation("Email is required"));
        }

        let account = match self.store.find_account_by_email(email).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                debug!("Password reset requested for an unknown email");
                return Ok(());
            }
            Err(err) => {
                error!("Failed to fetch account for password reset: {err}");
                return Ok(());
            }
        };

        let token = match self.resets.issue(account.id).await {
            Ok(token) => token,
            Err(err) => {
                error!("Failed to create password reset token: {err}");
                return Ok(());
            }
        };

        if let Err(err) = self.notifier.notify(&account.email, &token).await {
            warn!("Failed to deliver password reset token: {err}");
        }

        Ok(())
    }

    /// Finish password recovery with a reset token.
    ///
    /// # Errors
    /// `Validation` for missing fields, `InvalidToken`/`TokenExpired` for bad
    /// tokens, `Hash`/`Storage` for internal failures.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: SecretString,
    ) -> Result<(), AuthError> {
        if !present(reset_token) || new_password.expose_secret().is_empty() {
            return Err(AuthError::Validation(
                "Reset token and new password are required",
            ));
        }

        let record = self.resets.resolve(reset_token).await?;

        if self.resets.is_expired(record.created_at) {
            debug!(account_id = record.account_id, "Reset token expired");
            return Err(AuthError::TokenExpired);
        }

        let password_hash = hasher::hash_blocking(new_password).await?;

        match self
            .store
            .update_password_hash(record.account_id, &password_hash)
            .await
        {
            Ok(()) => {}
            Err(StoreError::NotFound) => return Err(AuthError::InvalidToken),
            Err(err) => return Err(AuthError::Storage(err)),
        }

        self.resets.consume(reset_token).await;
        info!(account_id = record.account_id, "Password reset");

        Ok(())
    }

    /// Decode a bearer token for the request gate.
    #[must_use]
    pub fn authenticate(&self, token: &str) -> Option<SessionClaims> {
        self.tokens.decode(token)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .field("resets", &self.resets)
            .finish_non_exhaustive()
    }
}
