//! Location domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a point of interest.
///
/// Wire format is the upper-case variant name (`"LAKE"`), which is also what
/// the `locations.type` column stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Cave,
    Lake,
    Spring,
    Waterfall,
    River,
    Peak,
    Canyon,
    Viewpoint,
}

impl LocationType {
    pub const ALL: [Self; 8] = [
        Self::Cave,
        Self::Lake,
        Self::Spring,
        Self::Waterfall,
        Self::River,
        Self::Peak,
        Self::Canyon,
        Self::Viewpoint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cave => "CAVE",
            Self::Lake => "LAKE",
            Self::Spring => "SPRING",
            Self::Waterfall => "WATERFALL",
            Self::River => "RIVER",
            Self::Peak => "PEAK",
            Self::Canyon => "CANYON",
            Self::Viewpoint => "VIEWPOINT",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`LocationType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown location type: {0}")]
pub struct UnknownLocationType(pub String);

impl FromStr for LocationType {
    type Err = UnknownLocationType;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownLocationType(s.to_owned()))
    }
}

/// Parse a comma-separated list of location types (`"LAKE,cave"`).
///
/// Empty segments are skipped, so `""` yields an empty list.
pub fn parse_location_types(s: &str) -> Result<Vec<LocationType>, UnknownLocationType> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}
