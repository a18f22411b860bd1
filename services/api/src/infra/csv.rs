use serde::Deserialize;

use crate::domain::repository::LocationParser;
use crate::domain::types::ImportedRow;
use crate::error::ImportError;

/// Header names are lower-cased before matching.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    location_type: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lon: Option<f64>,
}

/// Comma-separated rows with a header line: `name, lat, lon[, description][, type]`.
#[derive(Clone, Copy, Default)]
pub struct CsvLocationParser;

impl LocationParser for CsvLocationParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ImportedRow>, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);
        let headers: csv::StringRecord = reader
            .headers()?
            .iter()
            .map(str::to_ascii_lowercase)
            .collect();
        reader.set_headers(headers);

        reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| -> Result<ImportedRow, ImportError> {
                let row = result?;
                Ok(ImportedRow {
                    line: idx as u64 + 1,
                    name: row.name,
                    description: row.description,
                    location_type: row.location_type,
                    lat: row.lat,
                    lon: row.lon,
                })
            })
            .collect()
    }
}
