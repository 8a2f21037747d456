use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::instrument;

use super::{
    types::{SignInRequest, SignInResponse},
    INVALID_PAYLOAD,
};
use crate::{
    api::handlers::error_response,
    auth::{AuthService, SIGNIN_MESSAGE},
};

#[utoipa::path(
    post,
    path = "/api/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn signin(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
    };

    let password = SecretString::from(request.password.unwrap_or_default());

    match service
        .sign_in(request.email.as_deref().unwrap_or_default(), password)
        .await
    {
        Ok(signed_in) => (
            StatusCode::OK,
            Json(SignInResponse {
                message: SIGNIN_MESSAGE.to_string(),
                token: signed_in.token,
                user: signed_in.account,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
