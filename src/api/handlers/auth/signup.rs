use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    types::{MessageResponse, SignUpRequest},
    INVALID_PAYLOAD,
};
use crate::{
    api::handlers::error_response,
    auth::{AuthService, SIGNUP_MESSAGE},
};

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing fields or invalid email"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Hashing or storage failure")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn signup(
    service: Extension<Arc<AuthService>>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_PAYLOAD);
    };

    debug!("signup: {:?}", request);

    let SignUpRequest {
        name,
        email,
        password,
    } = request;
    let password = SecretString::from(password.unwrap_or_default());

    match service
        .sign_up(
            name.as_deref().unwrap_or_default(),
            email.as_deref().unwrap_or_default(),
            password,
        )
        .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(MessageResponse::new(SIGNUP_MESSAGE)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
