use wayfinder_auth_types::token::{JwtSecret, issue_access_token};

use crate::domain::repository::{PasswordEncoder, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;

pub struct LoginOutput {
    pub access_token: String,
    /// Seconds since UNIX epoch.
    pub expires_at: u64,
    pub user: User,
}

pub struct LoginUseCase<U: UserRepository, P: PasswordEncoder> {
    pub users: U,
    pub passwords: P,
    pub jwt_secret: JwtSecret,
    pub ttl_secs: u64,
}

impl<U: UserRepository, P: PasswordEncoder> LoginUseCase<U, P> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<LoginOutput, ApiError> {
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !self.passwords.verify(password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }
        if !user.can_sign_in() {
            return Err(ApiError::AccountDisabled);
        }

        let (access_token, expires_at) = issue_access_token(
            user.id,
            &user.email,
            user.role,
            self.ttl_secs,
            &self.jwt_secret,
        )
        .map_err(anyhow::Error::from)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutput {
            access_token,
            expires_at,
            user,
        })
    }
}
