use std::collections::HashSet;

use uuid::Uuid;

use wayfinder_domain::location::LocationType;

use crate::domain::repository::{FavouriteRepository, LocationRepository};
use crate::domain::types::{LocationFilter, Marker};
use crate::error::ApiError;

/// Marker search criteria as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct MarkerQuery {
    pub search_text: Option<String>,
    pub types: Vec<LocationType>,
    pub favourites_only: bool,
}

impl MarkerQuery {
    fn filter(&self) -> LocationFilter {
        LocationFilter {
            name_contains: self
                .search_text
                .clone()
                .filter(|s| !s.trim().is_empty()),
            types: self.types.clone(),
        }
    }
}

pub struct GetMarkersUseCase<R: LocationRepository, F: FavouriteRepository> {
    pub repo: R,
    pub favourites: F,
}

impl<R: LocationRepository, F: FavouriteRepository> GetMarkersUseCase<R, F> {
    /// `favourites_only` is ignored for anonymous callers.
    pub async fn execute(
        &self,
        query: MarkerQuery,
        caller: Option<Uuid>,
    ) -> Result<Vec<Marker>, ApiError> {
        let filter = query.filter();
        let mut locations = if filter.is_empty() {
            self.repo.list_all().await?
        } else {
            self.repo.search(&filter).await?
        };

        if let (true, Some(user_id)) = (query.favourites_only, caller) {
            let favourites: HashSet<i32> = self
                .favourites
                .list_location_ids(user_id)
                .await?
                .into_iter()
                .collect();
            locations.retain(|l| favourites.contains(&l.id));
        }

        Ok(locations.iter().map(Marker::from).collect())
    }
}
