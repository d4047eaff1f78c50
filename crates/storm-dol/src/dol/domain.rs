use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::{CardinalDirection, GeoPoint, Geometry};

/// The insured property, used as the origin for every distance and bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyContext {
    pub location: GeoPoint,
}

impl PropertyContext {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            location: GeoPoint::new(lat, lon),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.location.is_valid()
    }
}

/// Storm report classes understood by the scoring rubric.
///
/// Labels outside the known set are carried verbatim in `Other` so summaries
/// echo what the upstream normalizer sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    HailReport,
    WindReport,
    TornadoWarning,
    SevereThunderstormWarning,
    FlashFloodWarning,
    Other(String),
}

impl EventKind {
    pub fn label(&self) -> &str {
        match self {
            EventKind::HailReport => "hail_report",
            EventKind::WindReport => "wind_report",
            EventKind::TornadoWarning => "tor_warning",
            EventKind::SevereThunderstormWarning => "svr_warning",
            EventKind::FlashFloodWarning => "ff_warning",
            EventKind::Other(label) => label,
        }
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "hail_report" => EventKind::HailReport,
            "wind_report" => EventKind::WindReport,
            "tor_warning" => EventKind::TornadoWarning,
            "svr_warning" => EventKind::SevereThunderstormWarning,
            "ff_warning" => EventKind::FlashFloodWarning,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        EventKind::from(value.as_str())
    }
}

impl From<EventKind> for String {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized storm record handed over by the ingestion layer.
///
/// `magnitude` is inches for hail and mph for wind; warnings carry none.
/// `time_utc` is ISO-8601 and must start with a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub magnitude: Option<f64>,
    pub time_utc: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub source: String,
}

/// How to treat events whose geometry cannot be resolved to a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedLocationPolicy {
    /// Quarantine the event; it never reaches the per-day index.
    #[default]
    Exclude,
    /// Keep the event with a zero proximity contribution.
    ScoreAsDistant,
}

impl UnresolvedLocationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exclude" => Some(Self::Exclude),
            "score_as_distant" | "distant" => Some(Self::ScoreAsDistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Magnitude,
    Proximity,
}

/// One additive part of an event score, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub score: f64,
    pub notes: String,
}

/// A weather event placed relative to the property and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    #[serde(flatten)]
    pub event: WeatherEvent,
    pub event_date: NaiveDate,
    pub distance_miles: Option<f64>,
    pub bearing_deg: Option<f64>,
    pub direction_cardinal: Option<CardinalDirection>,
    pub property_within_geometry: bool,
    pub components: Vec<ScoreComponent>,
    pub score: f64,
}

impl ScoredEvent {
    pub fn component(&self, factor: ScoreFactor) -> f64 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.score)
            .sum()
    }

    pub fn magnitude_score(&self) -> f64 {
        self.component(ScoreFactor::Magnitude)
    }

    pub fn proximity_score(&self) -> f64 {
        self.component(ScoreFactor::Proximity)
    }
}
