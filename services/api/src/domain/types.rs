use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use wayfinder_domain::location::LocationType;
use wayfinder_domain::user::UserRole;

/// Signup confirmation token lifetime.
pub const CONFIRMATION_TOKEN_TTL_MINS: i64 = 15;

// ── Locations ────────────────────────────────────────────────────────────────

/// A stored point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location_type: LocationType,
    pub lat: f64,
    pub lon: f64,
}

/// Unvalidated location input from a request body or an import row.
/// `None` means the field was not supplied.
#[derive(Debug, Clone, Default)]
pub struct LocationDraft {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_type: Option<LocationType>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// First field that made a [`LocationDraft`] unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationInvalid {
    #[error("name is required")]
    Name,
    #[error("longitude is required and must be a finite number")]
    Longitude,
    #[error("latitude is required and must be a finite number")]
    Latitude,
    #[error("type is required")]
    Type,
}

impl LocationDraft {
    /// Checks name, longitude, latitude, type in that order.
    pub fn validate(self) -> Result<NewLocation, LocationInvalid> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(LocationInvalid::Name)?;
        let lon = self
            .lon
            .filter(|v| v.is_finite())
            .ok_or(LocationInvalid::Longitude)?;
        let lat = self
            .lat
            .filter(|v| v.is_finite())
            .ok_or(LocationInvalid::Latitude)?;
        let location_type = self.location_type.ok_or(LocationInvalid::Type)?;
        Ok(NewLocation {
            name,
            description: self.description.filter(|d| !d.is_empty()),
            location_type,
            lat,
            lon,
        })
    }
}

/// Validated location fields, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub description: Option<String>,
    pub location_type: LocationType,
    pub lat: f64,
    pub lon: f64,
}

/// Map projection of a location (no description).
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: i32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub location_type: LocationType,
}

impl From<&Location> for Marker {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            location_type: location.location_type,
        }
    }
}

/// Storage-level location filter. An empty `types` list matches every type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    pub name_contains: Option<String>,
    pub types: Vec<LocationType>,
}

impl LocationFilter {
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none() && self.types.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationFullInfo {
    pub location: Location,
    pub is_favourite: bool,
}

/// One data row of a bulk import, before type resolution and validation.
/// `line` is 1-based and counts data rows only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedRow {
    pub line: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_type: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub enabled: bool,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn can_sign_in(&self) -> bool {
        self.enabled && !self.locked
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl ConfirmationToken {
    /// Fresh random token for `user_id`, expiring [`CONFIRMATION_TOKEN_TTL_MINS`] after `now`.
    pub fn issue(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: now,
            expires_at: now + Duration::minutes(CONFIRMATION_TOKEN_TTL_MINS),
            confirmed_at: None,
        }
    }

    /// Still valid at the instant of `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}
