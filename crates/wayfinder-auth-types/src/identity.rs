//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use wayfinder_domain::user::UserRole;

use crate::token::{JwtSecret, validate_access_token};

/// The authenticated caller, taken from `Authorization: Bearer <jwt>`.
///
/// - `Identity` as an argument: 401 when the header is missing or invalid.
/// - `Option<Identity>`: `None` when the header is missing, 401 when it is
///   present but invalid.
///
/// The state must expose a [`JwtSecret`] through `FromRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn identify(parts: &Parts, secret: &JwtSecret) -> Result<Option<Identity>, StatusCode> {
    if !parts.headers.contains_key(AUTHORIZATION) {
        return Ok(None);
    }
    let bearer = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let info = validate_access_token(bearer.token(), secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected access token");
        StatusCode::UNAUTHORIZED
    })?;
    Ok(Some(Identity {
        user_id: info.user_id,
        email: info.email,
        role: info.role,
    }))
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Resolve synchronously and hand back a 'static future; an `async fn` here
    // would capture the `parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = identify(parts, &JwtSecret::from_ref(state));
        async move { result?.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> OptionalFromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = identify(parts, &JwtSecret::from_ref(state));
        async move { result }
    }
}
