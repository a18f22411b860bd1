use wayfinder_auth_types::identity::Identity;

use crate::error::ApiError;

pub mod auth;
pub mod health;
pub mod location;
pub mod user;

fn require_admin(identity: &Identity) -> Result<(), ApiError> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
