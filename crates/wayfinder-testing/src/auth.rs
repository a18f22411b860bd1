//! Mock auth helpers for integration tests.
//!
//! Handlers read the caller from `Authorization: Bearer <jwt>`. `MockAuth`
//! mints a real access token with a known secret so tests exercise the same
//! extractor path as production traffic.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use wayfinder_auth_types::token::{JwtSecret, issue_access_token};
use wayfinder_domain::user::UserRole;

/// Secret shared by `MockAuth` and test app state.
pub const TEST_JWT_SECRET: &str = "wayfinder-test-secret";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    pub fn user(email: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), email, UserRole::User)
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), email, UserRole::Admin)
    }

    pub fn secret() -> JwtSecret {
        JwtSecret::new(TEST_JWT_SECRET)
    }

    /// Signed access token, valid for an hour.
    pub fn token(&self) -> String {
        let (token, _) =
            issue_access_token(self.user_id, &self.email, self.role, 3600, &Self::secret())
                .unwrap();
        token
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
