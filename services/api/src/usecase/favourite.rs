use wayfinder_domain::email::Email;

use crate::domain::repository::{FavouriteRepository, LocationRepository, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;

async fn load_user<U: UserRepository>(users: &U, email: &Email) -> Result<User, ApiError> {
    users
        .find_by_email(email.as_str())
        .await?
        .ok_or(ApiError::UserNotFound)
}

// ── ToggleFavourite ──────────────────────────────────────────────────────────

pub struct ToggleFavouriteUseCase<L: LocationRepository, U: UserRepository, F: FavouriteRepository>
{
    pub locations: L,
    pub users: U,
    pub favourites: F,
}

impl<L: LocationRepository, U: UserRepository, F: FavouriteRepository>
    ToggleFavouriteUseCase<L, U, F>
{
    /// Returns `true` if the location is now a favourite, `false` if it was removed.
    pub async fn execute(&self, location_id: i32, email: &str) -> Result<bool, ApiError> {
        let email = Email::parse(email.trim())?;
        self.locations
            .find_by_id(location_id)
            .await?
            .ok_or(ApiError::LocationNotFound)?;
        let user = load_user(&self.users, &email).await?;

        if self.favourites.contains(user.id, location_id).await? {
            self.favourites.remove(user.id, location_id).await?;
            Ok(false)
        } else {
            self.favourites.add(user.id, location_id).await?;
            Ok(true)
        }
    }
}

// ── ListFavourites ───────────────────────────────────────────────────────────

pub struct ListFavouritesUseCase<U: UserRepository, F: FavouriteRepository> {
    pub users: U,
    pub favourites: F,
}

impl<U: UserRepository, F: FavouriteRepository> ListFavouritesUseCase<U, F> {
    pub async fn execute(&self, email: &str) -> Result<Vec<i32>, ApiError> {
        let email = Email::parse(email.trim())?;
        let user = load_user(&self.users, &email).await?;
        self.favourites.list_location_ids(user.id).await
    }
}
