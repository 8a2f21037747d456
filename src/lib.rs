//! # Keyward
//!
//! `keyward` is a small identity backend. It registers accounts, signs them in
//! with an opaque bearer token and recovers lost passwords through single-use
//! reset tokens.
//!
//! ## Layout
//!
//! - [`auth`] holds the credential hasher, the session token codec, the reset
//!   token manager and the [`auth::AuthService`] that ties them together.
//! - [`store`] defines the [`store::AccountStore`] seam with a `PostgreSQL`
//!   implementation and an in-memory one.
//! - [`api`] exposes the service over HTTP with axum.
//! - [`cli`] parses flags and environment, sets up logging and starts the server.
//!
//! ## Sessions
//!
//! Session tokens are `<nonce>-<account id>-<issued at>`. They carry no
//! signature and no server-side state, so a token stays usable until its TTL
//! runs out and cannot be revoked earlier.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash() {
        assert!(!GIT_COMMIT_HASH.is_empty());
    }

    #[test]
    fn test_built_info_package() {
        assert_eq!(built_info::PKG_NAME, "keyward");
        assert_eq!(built_info::PKG_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
