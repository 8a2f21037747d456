//! Request/response types for auth endpoints.
//!
//! Request fields are optional so a missing field and an empty one both reach the
//! service and fail validation the same way.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::PublicAccount;

fn redacted(value: Option<&String>) -> &'static str {
    if value.is_some() {
        "***"
    } else {
        "None"
    }
}

#[derive(ToSchema, Deserialize, Default)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &redacted(self.password.as_ref()))
            .finish()
    }
}

#[derive(ToSchema, Deserialize, Default)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &redacted(self.password.as_ref()))
            .finish()
    }
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(ToSchema, Deserialize, Default)]
pub struct ResetPasswordRequest {
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

impl std::fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("reset_token", &redacted(self.reset_token.as_ref()))
            .field("new_password", &redacted(self.new_password.as_ref()))
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SignInResponse {
    pub message: String,
    pub token: String,
    pub user: PublicAccount,
}
