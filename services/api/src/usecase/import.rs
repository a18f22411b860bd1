use wayfinder_domain::location::LocationType;

use crate::domain::repository::{LocationParser, LocationRepository};
use crate::domain::types::{ImportedRow, Location, LocationDraft, NewLocation};
use crate::error::{ApiError, ImportError};

/// Upload file name without directories or extension: `C:\data\waterfall.csv` → `waterfall`.
pub fn provenance_tag(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    Some(stem.trim()).filter(|s| !s.is_empty())
}

fn resolve_row(
    row: ImportedRow,
    tag: &str,
    tag_type: Option<LocationType>,
) -> Result<NewLocation, ImportError> {
    let line = row.line;
    let explicit = row
        .location_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let location_type = match explicit {
        Some(value) => value.parse().map_err(|_| ImportError::UnknownType {
            line,
            value: value.to_owned(),
        })?,
        None => tag_type.ok_or_else(|| ImportError::UnknownType {
            line,
            value: tag.to_owned(),
        })?,
    };
    LocationDraft {
        id: None,
        name: row.name,
        description: row.description,
        location_type: Some(location_type),
        lat: row.lat,
        lon: row.lon,
    }
    .validate()
    .map_err(|e| ImportError::InvalidRow {
        line,
        reason: e.to_string(),
    })
}

pub struct ImportLocationsUseCase<R: LocationRepository, P: LocationParser> {
    pub repo: R,
    pub parser: P,
}

impl<R: LocationRepository, P: LocationParser> ImportLocationsUseCase<R, P> {
    /// All-or-nothing: the first bad row aborts the import before anything is stored.
    pub async fn execute(
        &self,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<Vec<Location>, ApiError> {
        let tag = file_name
            .and_then(provenance_tag)
            .ok_or(ImportError::MissingFileName)?;
        let tag_type = tag.parse::<LocationType>().ok();

        let locations = self
            .parser
            .parse(bytes)?
            .into_iter()
            .map(|row| resolve_row(row, tag, tag_type))
            .collect::<Result<Vec<_>, _>>()?;
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let created = self.repo.create_many(&locations).await?;
        tracing::info!(source = tag, count = created.len(), "locations imported");
        Ok(created)
    }
}
