//! Bearer-token gate for protected routes.
//!
//! Expects exactly `Authorization: Bearer <token>`. On success the decoded
//! [`SessionClaims`] are placed in the request extensions for the handler.

use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::handlers::error_response,
    auth::{AuthService, SessionClaims},
};

const MISSING_HEADER: &str = "Missing Authorization header";
const INVALID_FORMAT: &str = "Invalid Authorization format";
const INVALID_TOKEN: &str = "Invalid or expired token";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BearerError {
    Missing,
    Malformed,
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;
    if value.is_empty() {
        return Err(BearerError::Missing);
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(BearerError::Malformed),
    }
}

/// `axum::middleware::from_fn` body for protected routes.
pub async fn require_session(
    service: Extension<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims: SessionClaims = match extract_bearer_token(request.headers()) {
        Ok(token) => match service.authenticate(token) {
            Some(claims) => claims,
            None => return error_response(StatusCode::UNAUTHORIZED, INVALID_TOKEN),
        },
        Err(BearerError::Missing) => {
            return error_response(StatusCode::UNAUTHORIZED, MISSING_HEADER);
        }
        Err(BearerError::Malformed) => {
            return error_response(StatusCode::UNAUTHORIZED, INVALID_FORMAT);
        }
    };

    debug!(account_id = claims.account_id, "Session accepted");
    request.extensions_mut().insert(claims);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_extracted() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")), Ok("abc"));
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(BearerError::Missing)
        );
        assert_eq!(extract_bearer_token(&headers("")), Err(BearerError::Missing));
    }

    #[test]
    fn malformed_header() {
        for value in ["Basic abc", "Bearer", "bearer abc", "Bearer a b", "Bearer  abc"] {
            assert_eq!(
                extract_bearer_token(&headers(value)),
                Err(BearerError::Malformed),
                "{value}"
            );
        }
    }
}
