use uuid::Uuid;

use crate::domain::repository::{FavouriteRepository, LocationRepository};
use crate::domain::types::{Location, LocationDraft, LocationFullInfo};
use crate::error::ApiError;

fn require_id(id: Option<i32>) -> Result<i32, ApiError> {
    id.ok_or_else(|| ApiError::validation("id is required"))
}

// ── ListLocations ────────────────────────────────────────────────────────────

pub struct ListLocationsUseCase<R: LocationRepository> {
    pub repo: R,
}

impl<R: LocationRepository> ListLocationsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Location>, ApiError> {
        self.repo.list_all().await
    }
}

// ── CreateLocation ───────────────────────────────────────────────────────────

pub struct CreateLocationUseCase<R: LocationRepository> {
    pub repo: R,
}

impl<R: LocationRepository> CreateLocationUseCase<R> {
    pub async fn execute(&self, draft: LocationDraft) -> Result<Location, ApiError> {
        let location = draft.validate()?;
        let created = self.repo.create(&location).await?;
        tracing::info!(location_id = created.id, "location created");
        Ok(created)
    }
}

// ── UpdateLocation ───────────────────────────────────────────────────────────

pub struct UpdateLocationUseCase<R: LocationRepository> {
    pub repo: R,
}

impl<R: LocationRepository> UpdateLocationUseCase<R> {
    pub async fn execute(&self, draft: LocationDraft) -> Result<Location, ApiError> {
        let id = require_id(draft.id)?;
        let location = draft.validate()?;
        self.repo
            .update(id, &location)
            .await?
            .ok_or(ApiError::LocationNotFound)
    }
}

// ── DeleteLocation ───────────────────────────────────────────────────────────

pub struct DeleteLocationUseCase<R: LocationRepository> {
    pub repo: R,
}

impl<R: LocationRepository> DeleteLocationUseCase<R> {
    /// Deleting an id that does not exist is not an error.
    pub async fn execute(&self, id: Option<i32>) -> Result<(), ApiError> {
        let id = require_id(id)?;
        if self.repo.delete(id).await? {
            tracing::info!(location_id = id, "location deleted");
        }
        Ok(())
    }
}

// ── GetLocationFullInfo ──────────────────────────────────────────────────────

pub struct GetLocationFullInfoUseCase<R: LocationRepository, F: FavouriteRepository> {
    pub repo: R,
    pub favourites: F,
}

impl<R: LocationRepository, F: FavouriteRepository> GetLocationFullInfoUseCase<R, F> {
    /// Full record for a location the caller has favourited, otherwise `None`.
    pub async fn execute(
        &self,
        id: Option<i32>,
        caller: Option<Uuid>,
    ) -> Result<Option<LocationFullInfo>, ApiError> {
        let id = require_id(id)?;
        let Some(user_id) = caller else {
            return Ok(None);
        };
        if !self.favourites.contains(user_id, id).await? {
            return Ok(None);
        }
        Ok(self
            .repo
            .find_by_id(id)
            .await?
            .map(|location| LocationFullInfo {
                location,
                is_favourite: true,
            }))
    }
}
