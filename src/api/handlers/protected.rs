use axum::extract::Extension;
use tracing::debug;

use crate::auth::SessionClaims;

pub const GRANTED: &str = "Access to protected resource granted";

/// Sample route behind the bearer gate.
#[utoipa::path(
    get,
    path = "/api/protected-resource",
    params(
        ("Authorization" = String, Header, description = "Bearer session token")
    ),
    responses(
        (status = 200, description = "Token accepted", body = String),
        (status = 401, description = "Missing, malformed, invalid or expired token")
    ),
    tag = "auth"
)]
pub async fn protected_resource(claims: Extension<SessionClaims>) -> &'static str {
    debug!(account_id = claims.account_id, "Protected resource accessed");
    GRANTED
}
