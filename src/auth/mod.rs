//! Role-based JWT authentication.
//!
//! Mutating routes are guarded by a single middleware parameterized by the
//! allowed-role set. Public read routes use [`OptionalIdentity`] to widen
//! visibility for admin callers.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Roles embedded in auth tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Counselor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Counselor => "counselor",
        }
    }
}

/// Allowed-role sets used when wiring routes.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const ADMIN_STAFF: &[Role] = &[Role::Admin, Role::Staff];
pub const COUNSELING_TEAM: &[Role] = &[Role::Admin, Role::Staff, Role::Counselor];

/// Token claims: subject id, role, and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

/// Mint a signed token for the given identity. Used by operators and tests;
/// there is no login endpoint in this service.
pub fn mint_token(
    secret: &str,
    user_id: &str,
    role: Role,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_claims(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Authorization middleware: requires a valid token whose role is in
/// `allowed`. When no JWT secret is configured all requests pass (dev mode,
/// warned at startup).
pub async fn require_role(
    secret: Option<String>,
    allowed: &'static [Role],
    mut request: Request,
    next: Next,
) -> Response {
    let Some(secret) = secret else {
        return next.run(request).await;
    };

    let Some(token) = bearer_token(request.headers()) else {
        return AppError::Unauthorized("Authentication required".to_string()).into_response();
    };

    match decode_claims(&secret, token) {
        Ok(claims) if allowed.contains(&claims.role) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Ok(claims) => AppError::Forbidden(format!(
            "Role '{}' may not perform this action",
            claims.role.as_str()
        ))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Identity extracted from the bearer token when present and valid.
/// Never rejects; public endpoints use it to decide visibility.
pub struct OptionalIdentity(pub Option<Claims>);

impl OptionalIdentity {
    /// Whether the caller sees unpublished/hidden documents.
    pub fn can_view_hidden(&self) -> bool {
        matches!(&self.0, Some(claims) if matches!(claims.role, Role::Admin | Role::Staff))
    }
}

impl FromRequestParts<crate::AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.jwt_secret.as_deref() else {
            return Ok(OptionalIdentity(None));
        };
        let claims =
            bearer_token(&parts.headers).and_then(|token| decode_claims(secret, token).ok());
        Ok(OptionalIdentity(claims))
    }
}
