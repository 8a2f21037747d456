//! Auth handlers and the bearer gate.
//!
//! Handlers only translate between JSON and [`AuthService`](crate::auth::AuthService);
//! every decision is made in the service. Failures are mapped here to a status
//! and a `{"error": ...}` body. Internal failures are logged with their source
//! chain and answered with a generic message.

pub(crate) mod gate;
pub(crate) mod password;
pub(crate) mod signin;
pub(crate) mod signup;
pub(crate) mod types;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::error_response;
use crate::auth::AuthError;

pub(crate) const INVALID_PAYLOAD: &str = "Invalid request payload";

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidToken | Self::TokenExpired => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DuplicateAccount => StatusCode::CONFLICT,
            Self::Hash(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            error!("Auth request failed: {self:?}");
        }
        error_response(self.status(), &self.to_string())
    }
}
