//! Login/logout handlers.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::auth::{clear_cookie, issue_token, token_cookie, Claims};
use crate::error::ApiResult;
use crate::state::AppState;

/// Login request: the identity to sign into the cookie.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Ack body shared by login and logout.
#[derive(Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// POST /jwt - sign the caller's email into the token cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AckResponse>)> {
    request.validate()?;

    let claims = Claims::new(request.email.as_str(), state.config.jwt_ttl);
    let token = issue_token(&claims, &state.config.jwt_secret)?;

    info!(email = %request.email, "issued identity token");

    let jar = jar.add(token_cookie(token, state.config.jwt_ttl));
    Ok((jar, Json(AckResponse { success: true })))
}

/// GET /logout - clear the token cookie. Idempotent; there is no
/// server-side revocation, expiry is the only other invalidation.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AckResponse>) {
    let jar = jar.add(clear_cookie());
    (jar, Json(AckResponse { success: true }))
}
