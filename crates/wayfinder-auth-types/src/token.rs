//! HS256 access tokens.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wayfinder_domain::user::UserRole;

/// Access-token lifetime used when the service is not configured otherwise (4 hours).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 14400;

/// HMAC key for signing and validating access tokens.
///
/// Cheap to clone; `Debug` never prints the key.
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Caller identity recovered from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `email` | user email, the identifier favourites are keyed by |
/// | `role` | [`UserRole`] wire value |
/// | `exp` | expiry, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub role: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an access token valid for `ttl_secs`. Returns the token and its expiry.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    ttl_secs: u64,
    secret: &JwtSecret,
) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + ttl_secs;
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Sign)?;
    Ok((token, exp))
}

/// Validate a bearer token: HS256 signature, `exp` (default 60s leeway),
/// required `sub` + `exp`, and a known role.
pub fn validate_access_token(token: &str, secret: &JwtSecret) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?
    .claims;

    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let role = UserRole::from_u8(claims.role).ok_or(TokenError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        email: claims.email,
        role,
        exp: claims.exp,
    })
}
