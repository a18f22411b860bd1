use chrono::Utc;
use uuid::Uuid;

use wayfinder_domain::email::Email;
use wayfinder_domain::user::UserRole;

use crate::domain::repository::{
    ConfirmationTokenRepository, Mailer, PasswordEncoder, UserRepository,
};
use crate::domain::types::{ConfirmationToken, User};
use crate::error::ApiError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub struct RegisterUserUseCase<U: UserRepository, P: PasswordEncoder, M: Mailer> {
    pub users: U,
    pub passwords: P,
    pub mailer: M,
    /// Base URL the confirmation link points at.
    pub public_url: String,
}

impl<U: UserRepository, P: PasswordEncoder, M: Mailer> RegisterUserUseCase<U, P, M> {
    /// Creates a disabled account and returns its confirmation token.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<String, ApiError> {
        let email = Email::parse(input.email.trim())?;
        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(ApiError::UserAlreadyExists);
        }
        if input.password.is_empty() {
            return Err(ApiError::validation("password is required"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email: email.as_str().to_owned(),
            password_hash: self.passwords.hash(&input.password)?,
            role: input.role,
            enabled: false,
            locked: false,
            created_at: now,
        };
        let token = ConfirmationToken::issue(user.id, now);
        self.users.create_with_token(&user, &token).await?;
        tracing::info!(user_id = %user.id, role = ?user.role, "user registered");

        let confirm_url = format!(
            "{}/users/registration/confirm?token={}",
            self.public_url.trim_end_matches('/'),
            token.token
        );
        if let Err(e) = self.mailer.send_confirmation(&email, &confirm_url).await {
            tracing::warn!(user_id = %user.id, error = ?e, "confirmation email not sent");
        }
        Ok(token.token)
    }
}

// ── ConfirmToken ─────────────────────────────────────────────────────────────

pub struct ConfirmTokenUseCase<T: ConfirmationTokenRepository> {
    pub tokens: T,
}

impl<T: ConfirmationTokenRepository> ConfirmTokenUseCase<T> {
    /// Expiry is checked before confirmation state, so a stale token always reports
    /// `TokenExpired`.
    pub async fn execute(&self, token: &str) -> Result<&'static str, ApiError> {
        let found = self
            .tokens
            .find_by_token(token.trim())
            .await?
            .ok_or(ApiError::TokenNotFound)?;
        let now = Utc::now();
        if found.is_expired_at(now) {
            return Err(ApiError::TokenExpired);
        }
        if found.is_confirmed() {
            return Err(ApiError::TokenAlreadyConfirmed);
        }
        self.tokens.confirm(&found, now).await?;
        tracing::info!(user_id = %found.user_id, "signup confirmed");
        Ok("confirmed")
    }
}
