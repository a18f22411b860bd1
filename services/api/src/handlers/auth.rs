use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::login::LoginUseCase;

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds since UNIX epoch.
    pub expires_at: u64,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        passwords: state.password_encoder(),
        jwt_secret: state.jwt_secret.clone(),
        ttl_secs: state.access_token_ttl_secs,
    };
    let output = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        access_token: output.access_token,
        token_type: "Bearer",
        expires_at: output.expires_at,
        user: output.user.into(),
    }))
}
