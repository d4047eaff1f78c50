use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{EventKind, WeatherEvent};
use crate::geo::Geometry;

#[derive(Debug)]
pub enum EventImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    UnsupportedFormat { extension: String },
}

impl std::fmt::Display for EventImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventImportError::Io(err) => write!(f, "failed to read event file: {}", err),
            EventImportError::Csv(err) => write!(f, "invalid event CSV data: {}", err),
            EventImportError::Json(err) => write!(f, "invalid event JSON data: {}", err),
            EventImportError::UnsupportedFormat { extension } => write!(
                f,
                "unsupported event file extension '{}' (expected .json or .csv)",
                extension
            ),
        }
    }
}

impl std::error::Error for EventImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventImportError::Io(err) => Some(err),
            EventImportError::Csv(err) => Some(err),
            EventImportError::Json(err) => Some(err),
            EventImportError::UnsupportedFormat { .. } => None,
        }
    }
}

impl From<std::io::Error> for EventImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for EventImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for EventImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads already-normalized events from JSON arrays or point-report CSV files.
pub struct EventImporter;

impl EventImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<WeatherEvent>, EventImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?),
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?),
            _ => Err(EventImportError::UnsupportedFormat { extension }),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<WeatherEvent>, EventImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Columns: `id,type,magnitude,time_utc,lat,lon,source`. Rows without
    /// coordinates produce events with no geometry.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<WeatherEvent>, EventImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut events = Vec::new();

        for row in csv_reader.deserialize::<EventRow>() {
            events.push(row?.into_event());
        }

        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
struct EventRow {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    magnitude: Option<f64>,
    time_utc: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    source: String,
}

impl EventRow {
    fn into_event(self) -> WeatherEvent {
        let geometry = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Geometry::point(lat, lon)),
            _ => None,
        };

        WeatherEvent {
            id: self.id,
            kind: EventKind::from(self.kind),
            magnitude: self.magnitude,
            time_utc: self.time_utc,
            geometry,
            source: self.source,
        }
    }
}
