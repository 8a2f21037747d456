//! Password recovery endpoints.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::instrument;

use super::{
    types::{ForgotPasswordRequest, MessageResponse, ResetPasswordRequest},
    INVALID_PAYLOAD,
};
use crate::{
    api::handlers::error_response,
    auth::{AuthService, FORGOT_PASSWORD_MESSAGE, RESET_PASSWORD_MESSAGE},
};

/// Start a reset (always 200 with the same body to avoid account probing).
#[utoipa::path(
    post,
    path = "/api/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Request accepted", body = MessageResponse),
        (status = 400, description = "Missing email")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn forgot_password(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<ForgotPasswordRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
    };

    match service
        .forgot_password(request.email.as_deref().unwrap_or_default())
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Set a new password with a reset token.
#[utoipa::path(
    post,
    path = "/api/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Missing fields, invalid or expired token"),
        (status = 500, description = "Hashing or storage failure")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn reset_password(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<ResetPasswordRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
    };

    let new_password = SecretString::from(request.new_password.unwrap_or_default());

    match service
        .reset_password(
            request.reset_token.as_deref().unwrap_or_default(),
            new_password,
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(RESET_PASSWORD_MESSAGE)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
