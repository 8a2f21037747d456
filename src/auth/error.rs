use thiserror::Error;

use super::hasher::HashError;
use crate::store::StoreError;

/// Every way an auth flow can fail.
///
/// Display strings are what callers see, so the credential and token variants are
/// deliberately vague. Internal detail lives in the `source` chain and is only
/// logged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User already exists")]
    DuplicateAccount,
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Reset token has expired")]
    TokenExpired,
    #[error("Failed to hash password")]
    Hash(#[from] HashError),
    #[error("Internal server error")]
    Storage(#[source] StoreError),
}

impl AuthError {
    /// True for failures that are the server's fault rather than the caller's.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Hash(_) | Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn storage_detail_is_not_in_display() {
        let err = AuthError::Storage(StoreError::Storage(anyhow!("connection refused to 10.0.0.5")));
        assert_eq!(err.to_string(), "Internal server error");
        assert!(err.is_internal());
    }

    #[test]
    fn credential_failures_share_one_message() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert!(!AuthError::InvalidCredentials.is_internal());
    }
}
