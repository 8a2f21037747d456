//! Stateless bearer session tokens.
//!
//! A token is `<nonce>-<account id>-<issued at>`: a 16-byte random nonce as 32
//! lowercase hex characters, the decimal account id, and the issuance time in UTC
//! epoch seconds. Hex and decimal digits never contain `-`, so the three fields
//! always split back unambiguously.
//!
//! Nothing is stored server side. Validity is recomputed from the token itself,
//! which means a token cannot be revoked before it expires. The nonce is not looked
//! up anywhere; it only makes tokens unique and unguessable as a whole. The token is
//! not signed either, so it proves nothing beyond its own shape and age.

use std::sync::Arc;

use tracing::debug;

use super::clock::Clock;
use crate::store::AccountId;

pub const NONCE_BYTES: usize = 16;
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
const FIELD_DELIMITER: char = '-';

/// Fields recovered from a valid session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionClaims {
    pub account_id: AccountId,
    pub issued_at: i64,
}

/// Build a token string for `account_id` stamped with `issued_at`.
pub(crate) fn generate_token(account_id: AccountId, issued_at: i64) -> String {
    let nonce: [u8; NONCE_BYTES] = rand::random();
    format!(
        "{}{FIELD_DELIMITER}{account_id}{FIELD_DELIMITER}{issued_at}",
        hex::encode(nonce)
    )
}

/// Split a token into its fields without looking at the clock.
pub(crate) fn parse_token(token: &str) -> Option<SessionClaims> {
    let parts: Vec<&str> = token.split(FIELD_DELIMITER).collect();
    let [nonce, account_id, issued_at] = parts.as_slice() else {
        debug!("Token has {} fields, expected 3", parts.len());
        return None;
    };

    if nonce.len() != NONCE_BYTES * 2
        || !nonce
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
    {
        debug!("Token nonce is not {} hex characters", NONCE_BYTES * 2);
        return None;
    }

    let Ok(account_id) = account_id.parse::<AccountId>() else {
        debug!("Token account id is not a number");
        return None;
    };
    if account_id <= 0 {
        return None;
    }

    let Ok(issued_at) = issued_at.parse::<i64>() else {
        debug!("Token timestamp is not a number");
        return None;
    };

    Some(SessionClaims {
        account_id,
        issued_at,
    })
}

#[derive(Clone)]
pub struct TokenCodec {
    clock: Arc<dyn Clock>,
    ttl_seconds: i64,
}

impl TokenCodec {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Mint a session token for `account_id`, issued now.
    #[must_use]
    pub fn issue(&self, account_id: AccountId) -> String {
        generate_token(account_id, self.clock.now_unix())
    }

    /// Decode a token that is well formed and still inside its window.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        let claims = parse_token(token)?;
        let expires_at = claims.issued_at.saturating_add(self.ttl_seconds);
        if self.clock.now_unix() >= expires_at {
            debug!(expires_at, "Session token expired");
            return None;
        }
        Some(claims)
    }

    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_some()
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
