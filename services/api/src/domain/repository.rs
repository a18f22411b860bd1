#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use wayfinder_domain::email::Email;

use crate::domain::types::{
    ConfirmationToken, ImportedRow, Location, LocationFilter, NewLocation, User,
};
use crate::error::{ApiError, ImportError};

/// Repository for points of interest. Every list is ordered by ascending id.
pub trait LocationRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Location>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, ApiError>;

    /// Case-insensitive name substring match combined with a type filter.
    async fn search(&self, filter: &LocationFilter) -> Result<Vec<Location>, ApiError>;

    async fn create(&self, location: &NewLocation) -> Result<Location, ApiError>;

    /// Overwrite every field of `id`. Returns `None` if no such location exists.
    async fn update(&self, id: i32, location: &NewLocation)
    -> Result<Option<Location>, ApiError>;

    /// Delete a location. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;

    /// Insert all rows in one transaction; none are stored if any insert fails.
    async fn create_many(&self, locations: &[NewLocation]) -> Result<Vec<Location>, ApiError>;
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn list_all(&self) -> Result<Vec<User>, ApiError>;

    /// Persist a new user together with its signup token, atomically.
    async fn create_with_token(
        &self,
        user: &User,
        token: &ConfirmationToken,
    ) -> Result<(), ApiError>;
}

/// Repository for the user ↔ location favourite relation.
pub trait FavouriteRepository: Send + Sync {
    async fn list_location_ids(&self, user_id: Uuid) -> Result<Vec<i32>, ApiError>;
    async fn contains(&self, user_id: Uuid, location_id: i32) -> Result<bool, ApiError>;
    /// No-op when the pair already exists.
    async fn add(&self, user_id: Uuid, location_id: i32) -> Result<(), ApiError>;
    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, location_id: i32) -> Result<bool, ApiError>;
}

/// Repository for signup confirmation tokens.
pub trait ConfirmationTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<ConfirmationToken>, ApiError>;

    /// Mark the token confirmed and enable its user in one transaction.
    async fn confirm(
        &self,
        token: &ConfirmationToken,
        at: DateTime<Utc>,
    ) -> Result<(), ApiError>;
}

/// One-way password hashing.
pub trait PasswordEncoder: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ApiError>;
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

/// Outgoing account email.
pub trait Mailer: Send + Sync {
    async fn send_confirmation(&self, to: &Email, confirm_url: &str) -> Result<(), ApiError>;
}

/// Turns an uploaded file into raw location rows.
pub trait LocationParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ImportedRow>, ImportError>;
}
