//! Cookie-carried JWT authentication.
//!
//! Login signs the caller's email into an HS256 token with a 1-hour expiry
//! and sets it as an HTTP-only cookie. Protected routes extract and verify
//! the cookie with [`AuthUser`]; routes parameterized by a caller-owned
//! email additionally run the ownership check.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the identity cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Identity token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated email
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Build claims for an email with the given lifetime.
    pub fn new(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            email: email.into(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
}

/// Sign claims into a token. Signing faults are server errors, never the
/// client's fault.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, ApiError> {
    if secret.is_empty() {
        return Err(ApiError::internal("JWT_SECRET is not configured"));
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("token signing failed: {}", e)))
}

/// Verify a token's signature and expiry.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    if secret.is_empty() {
        return Err(ApiError::internal("JWT_SECRET is not configured"));
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::unauthorized(format!("invalid token: {}", e)))?;

    Ok(data.claims)
}

/// Build the identity cookie.
///
/// The `secure` flag stays off: the frontend this serves talks to the API
/// over plain HTTP outside production deployments.
pub fn token_cookie(token: String, ttl: Duration) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build()
}

/// Cookie that clears the identity token. Idempotent; clearing an absent
/// cookie is fine.
pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// Authenticated user extracted from the token cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl AuthUser {
    /// Ownership check: the verified identity must match the resource
    /// owner named in the request path.
    pub fn require_owner(&self, email: &str) -> Result<(), ApiError> {
        if self.email == email {
            Ok(())
        } else {
            Err(ApiError::forbidden("forbidden access"))
        }
    }
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar
            .get(TOKEN_COOKIE)
            .ok_or_else(|| ApiError::unauthorized("missing token cookie"))?;

        let claims = verify_token(cookie.value(), &state.config.jwt_secret)?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let claims = Claims::new("worker@example.com", Duration::from_secs(3600));
        let token = issue_token(&claims, SECRET).unwrap();

        let verified = verify_token(&token, SECRET).unwrap();
        assert_eq!(verified.email, "worker@example.com");
        assert_eq!(verified.exp - verified.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Already past expiry; jsonwebtoken's default leeway is 60s
        let mut claims = Claims::new("worker@example.com", Duration::from_secs(3600));
        claims.iat -= 7200;
        claims.exp -= 7200;

        let token = issue_token(&claims, SECRET).unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = Claims::new("worker@example.com", Duration::from_secs(3600));
        let token = issue_token(&claims, SECRET).unwrap();

        let err = verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_empty_secret_is_a_server_error() {
        let claims = Claims::new("worker@example.com", Duration::from_secs(3600));
        assert!(matches!(
            issue_token(&claims, "").unwrap_err(),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = token_cookie("tok".to_string(), Duration::from_secs(3600));
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
        // Known design gap carried from the source: secure stays unset
        assert_eq!(cookie.secure(), None);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_cookie();
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.value(), "");
    }

    #[test]
    fn test_ownership_check() {
        let user = AuthUser {
            email: "buyer@example.com".to_string(),
        };
        assert!(user.require_owner("buyer@example.com").is_ok());
        assert!(matches!(
            user.require_owner("other@example.com").unwrap_err(),
            ApiError::Forbidden(_)
        ));
    }
}
