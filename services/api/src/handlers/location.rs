use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use wayfinder_auth_types::identity::Identity;
use wayfinder_domain::location::{LocationType, parse_location_types};

use crate::domain::types::{Location, LocationDraft, LocationFullInfo, Marker};
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::import::ImportLocationsUseCase;
use crate::usecase::location::{
    CreateLocationUseCase, DeleteLocationUseCase, GetLocationFullInfoUseCase,
    ListLocationsUseCase, UpdateLocationUseCase,
};
use crate::usecase::marker::{GetMarkersUseCase, MarkerQuery};

#[derive(Serialize)]
pub struct LocationResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub lat: f64,
    pub lon: f64,
}

impl From<Location> for LocationResponse {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            description: l.description,
            location_type: l.location_type,
            lat: l.lat,
            lon: l.lon,
        }
    }
}

fn to_responses(locations: Vec<Location>) -> Json<Vec<LocationResponse>> {
    Json(locations.into_iter().map(LocationResponse::from).collect())
}

// ── GET /locations ───────────────────────────────────────────────────────────

pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let usecase = ListLocationsUseCase {
        repo: state.location_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── GET /locations/markers ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkersParams {
    pub search_text: Option<String>,
    /// Comma-separated, e.g. `LAKE,CAVE`.
    pub location_types: Option<String>,
    #[serde(default)]
    pub is_favourite: bool,
}

#[derive(Serialize)]
pub struct MarkerResponse {
    pub id: i32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

impl From<Marker> for MarkerResponse {
    fn from(m: Marker) -> Self {
        Self {
            id: m.id,
            name: m.name,
            lat: m.lat,
            lon: m.lon,
            location_type: m.location_type,
        }
    }
}

pub async fn get_markers(
    identity: Option<Identity>,
    State(state): State<AppState>,
    Query(params): Query<MarkersParams>,
) -> Result<Json<Vec<MarkerResponse>>, ApiError> {
    let types = match params.location_types.as_deref() {
        Some(raw) => parse_location_types(raw).map_err(|e| ApiError::Validation(e.to_string()))?,
        None => Vec::new(),
    };
    let usecase = GetMarkersUseCase {
        repo: state.location_repo(),
        favourites: state.favourite_repo(),
    };
    let markers = usecase
        .execute(
            MarkerQuery {
                search_text: params.search_text,
                types,
                favourites_only: params.is_favourite,
            },
            identity.map(|i| i.user_id),
        )
        .await?;
    Ok(Json(markers.into_iter().map(MarkerResponse::from).collect()))
}

// ── GET /locations/{id} ──────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFullInfoResponse {
    #[serde(flatten)]
    pub location: LocationResponse,
    pub is_favourite: bool,
}

impl From<LocationFullInfo> for LocationFullInfoResponse {
    fn from(info: LocationFullInfo) -> Self {
        Self {
            location: info.location.into(),
            is_favourite: info.is_favourite,
        }
    }
}

pub async fn get_location(
    identity: Option<Identity>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<LocationFullInfoResponse>>, ApiError> {
    let usecase = GetLocationFullInfoUseCase {
        repo: state.location_repo(),
        favourites: state.favourite_repo(),
    };
    let info = usecase.execute(Some(id), identity.map(|i| i.user_id)).await?;
    Ok(Json(info.map(LocationFullInfoResponse::from)))
}

// ── POST /locations, POST /locations/{id} ────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub location_type: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationRequest {
    fn into_draft(self, id: Option<i32>) -> Result<LocationDraft, ApiError> {
        let location_type = self
            .location_type
            .as_deref()
            .map(str::parse::<LocationType>)
            .transpose()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(LocationDraft {
            id,
            name: self.name,
            description: self.description,
            location_type,
            lat: self.lat,
            lon: self.lon,
        })
    }
}

pub async fn create_location(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<LocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), ApiError> {
    require_admin(&identity)?;
    let usecase = CreateLocationUseCase {
        repo: state.location_repo(),
    };
    let location = usecase.execute(body.into_draft(None)?).await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}

pub async fn update_location(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<LocationRequest>,
) -> Result<Json<LocationResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = UpdateLocationUseCase {
        repo: state.location_repo(),
    };
    let location = usecase.execute(body.into_draft(Some(id))?).await?;
    Ok(Json(location.into()))
}

// ── POST /locations/{id}/delete ──────────────────────────────────────────────

pub async fn delete_location(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_admin(&identity)?;
    let usecase = DeleteLocationUseCase {
        repo: state.location_repo(),
    };
    usecase.execute(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /locations/import ───────────────────────────────────────────────────

const CSV_CONTENT_TYPE: &str = "text/csv";

/// Accepts `text/csv` with or without parameters (`text/csv; charset=utf-8`).
fn is_csv(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CSV_CONTENT_TYPE))
}

/// Multipart upload with a single `file` part. Non-CSV uploads are ignored.
pub async fn import_locations(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    require_admin(&identity)?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if !is_csv(field.content_type()) {
            tracing::info!(content_type = ?field.content_type(), "ignoring non-csv upload");
            return Ok(Json(Vec::new()));
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?;

        let usecase = ImportLocationsUseCase {
            repo: state.location_repo(),
            parser: state.location_parser(),
        };
        let created = usecase.execute(file_name.as_deref(), &bytes).await?;
        return Ok(to_responses(created));
    }
    Err(ApiError::validation("file is required"))
}
