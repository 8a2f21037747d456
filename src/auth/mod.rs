//! Credential hashing, session tokens and the password-reset workflow.
//!
//! ## Session tokens
//!
//! Session tokens are stateless: validity is recomputed from the token's own
//! issuance time, so there is nothing to revoke. A server-side allow or deny list
//! would be the place to add revocation if it is ever needed.
//!
//! ## Reset tokens
//!
//! Reset tokens are persisted and single use. A successful reset deletes the
//! token; if that delete fails the row lingers until it expires.

pub mod clock;
mod error;
pub mod hasher;
mod notifier;
pub mod reset;
mod service;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use notifier::{LogResetNotifier, ResetNotifier};
pub use reset::ResetTokenManager;
pub use service::{
    AuthConfig, AuthService, PublicAccount, SignIn, FORGOT_PASSWORD_MESSAGE,
    RESET_PASSWORD_MESSAGE, SIGNIN_MESSAGE, SIGNUP_MESSAGE,
};
pub use token::{SessionClaims, TokenCodec};
