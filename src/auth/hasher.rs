//! Credential hashing.
//!
//! Passwords are hashed with Argon2id (default parameters, random salt) and stored
//! as PHC strings, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`. There is no decode
//! operation; the only way back is [`verify`].

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

// Throwaway hash used to equalize the cost of sign-ins for unknown accounts.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    hash(&SecretString::from("keyward-dummy-password".to_string())).ok()
});

/// Hash a plaintext password into a salted PHC string.
///
/// # Errors
/// Returns [`HashError`] if salt generation or the Argon2 computation fails.
pub fn hash(plaintext: &SecretString) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HashError(err.to_string()))
}

/// Check a plaintext password against a stored PHC string.
///
/// The digest comparison inside `argon2` is constant time. Malformed stored
/// hashes verify as `false`.
#[must_use]
pub fn verify(plaintext: &SecretString, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        error!("Stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.expose_secret().as_bytes(), &parsed)
        .is_ok()
}

/// Burn one verification without a real account behind it. Always `false`.
pub fn verify_dummy(plaintext: &SecretString) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(plaintext, dummy);
    }
    false
}

/// [`hash`] on the blocking pool, so the async runtime is not stalled.
///
/// # Errors
/// Returns [`HashError`] if hashing fails or the blocking task panics.
pub async fn hash_blocking(plaintext: SecretString) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hash(&plaintext))
        .await
        .map_err(|err| HashError(err.to_string()))?
}

/// [`verify`] on the blocking pool. A panicked task verifies as `false`.
pub async fn verify_blocking(plaintext: SecretString, hashed: Option<String>) -> bool {
    tokio::task::spawn_blocking(move || match hashed {
        Some(hashed) => verify(&plaintext, &hashed),
        None => verify_dummy(&plaintext),
    })
    .await
    .unwrap_or(false)
}
