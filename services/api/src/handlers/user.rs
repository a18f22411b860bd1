use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use wayfinder_auth_types::identity::Identity;
use wayfinder_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::favourite::{ListFavouritesUseCase, ToggleFavouriteUseCase};
use crate::usecase::registration::{ConfirmTokenUseCase, RegisterUserInput, RegisterUserUseCase};
use crate::usecase::user::{GetUserUseCase, ListUsersUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub enabled: bool,
    pub locked: bool,
    #[serde(serialize_with = "wayfinder_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            role: user.role,
            enabled: user.enabled,
            locked: user.locked,
            created_at: user.created_at,
        }
    }
}

// ── POST /users/registration ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<UserRole>,
}

/// Open signup for `USER`; creating an `ADMIN` needs an admin caller.
pub async fn register(
    identity: Option<Identity>,
    State(state): State<AppState>,
    Json(body): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<String>), ApiError> {
    let role = body.role.unwrap_or_default();
    if role.is_admin() {
        let caller = identity.ok_or(ApiError::Unauthorized)?;
        require_admin(&caller)?;
    }
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        passwords: state.password_encoder(),
        mailer: state.mailer.clone(),
        public_url: state.public_url.clone(),
    };
    let token = usecase
        .execute(RegisterUserInput {
            email: body.email,
            password: body.password,
            role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(token)))
}

// ── GET /users/registration/confirm ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub token: String,
}

pub async fn confirm_registration(
    State(state): State<AppState>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<&'static str>, ApiError> {
    let usecase = ConfirmTokenUseCase {
        tokens: state.confirmation_token_repo(),
    };
    Ok(Json(usecase.execute(&params.token).await?))
}

// ── Favourites ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FavouriteParams {
    /// Defaults to the caller's own email.
    pub email: Option<String>,
}

/// Non-admins may only read or change their own favourites. Emails are stored in
/// lower case, so the requested address is lower-cased before it is compared with
/// the caller's. A blank email is left for the use case to reject.
fn target_email(identity: &Identity, requested: Option<String>) -> Result<String, ApiError> {
    let Some(email) = requested else {
        return Ok(identity.email.clone());
    };
    let email = email.trim().to_lowercase();
    if !identity.is_admin() && !email.is_empty() && email != identity.email {
        return Err(ApiError::Forbidden);
    }
    Ok(email)
}

pub async fn list_favourites(
    identity: Identity,
    State(state): State<AppState>,
    Query(params): Query<FavouriteParams>,
) -> Result<Json<Vec<i32>>, ApiError> {
    let email = target_email(&identity, params.email)?;
    let usecase = ListFavouritesUseCase {
        users: state.user_repo(),
        favourites: state.favourite_repo(),
    };
    Ok(Json(usecase.execute(&email).await?))
}

pub async fn toggle_favourite(
    identity: Identity,
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
    Query(params): Query<FavouriteParams>,
) -> Result<Json<bool>, ApiError> {
    let email = target_email(&identity, params.email)?;
    let usecase = ToggleFavouriteUseCase {
        locations: state.location_repo(),
        users: state.user_repo(),
        favourites: state.favourite_repo(),
    };
    Ok(Json(usecase.execute(location_id, &email).await?))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_admin(&identity)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Option<Identity>,
    State(state): State<AppState>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let Some(identity) = identity else {
        return Ok(Json(None));
    };
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(Some(user.into())))
}
