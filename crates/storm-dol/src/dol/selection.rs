use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::domain::{EventKind, ScoredEvent};
use crate::geo::CardinalDirection;

/// Maximum number of supporting events reported for the chosen date.
pub const TOP_EVENT_LIMIT: usize = 10;

/// Best-event score that maps to full confidence.
pub const CONFIDENCE_CALIBRATION: f64 = 100.0;

/// Compact evidence line shown to adjusters beside the recommended date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub magnitude: Option<f64>,
    pub distance_miles: Option<f64>,
    pub direction_cardinal: Option<CardinalDirection>,
    pub time_utc: String,
    pub source: String,
    pub score: f64,
    pub property_within_geometry: bool,
}

impl From<&ScoredEvent> for EventSummary {
    fn from(scored: &ScoredEvent) -> Self {
        Self {
            id: scored.event.id.clone(),
            kind: scored.event.kind.clone(),
            magnitude: scored.event.magnitude,
            distance_miles: scored.distance_miles.map(round_hundredths),
            direction_cardinal: scored.direction_cardinal,
            time_utc: scored.event.time_utc.clone(),
            source: scored.event.source.clone(),
            score: scored.score,
            property_within_geometry: scored.property_within_geometry,
        }
    }
}

/// Date-of-loss recommendation with its supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DolResult {
    #[serde(serialize_with = "date_or_empty")]
    pub recommended_date_utc: Option<NaiveDate>,
    pub top_events: Vec<EventSummary>,
    pub confidence: f64,
    pub total_events_scanned: usize,
    pub events_quarantined: usize,
}

impl DolResult {
    pub fn empty(total_events_scanned: usize) -> Self {
        Self {
            recommended_date_utc: None,
            top_events: Vec::new(),
            confidence: 0.0,
            total_events_scanned,
            events_quarantined: 0,
        }
    }

    /// `YYYY-MM-DD`, or an empty string when no date could be recommended.
    pub fn recommended_date_label(&self) -> String {
        self.recommended_date_utc
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Choose the day whose strongest event scores highest.
///
/// Days are ranked on their maximum event score, never a sum. Equal maxima
/// resolve to the earliest date.
pub fn pick_dol(scored: &[ScoredEvent], by_date: &BTreeMap<NaiveDate, f64>) -> DolResult {
    let mut best: Option<(NaiveDate, f64)> = None;
    for (date, score) in by_date {
        match best {
            Some((_, best_score)) if *score <= best_score => {}
            _ => best = Some((*date, *score)),
        }
    }

    let Some((date, best_score)) = best else {
        return DolResult::empty(scored.len());
    };

    let mut same_day: Vec<&ScoredEvent> = scored
        .iter()
        .filter(|event| event.event_date == date)
        .collect();
    same_day.sort_by(|a, b| b.score.total_cmp(&a.score));

    let top_events = same_day
        .into_iter()
        .take(TOP_EVENT_LIMIT)
        .map(EventSummary::from)
        .collect();

    DolResult {
        recommended_date_utc: Some(date),
        top_events,
        confidence: (best_score / CONFIDENCE_CALIBRATION).min(1.0),
        total_events_scanned: scored.len(),
        events_quarantined: 0,
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn date_or_empty<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        None => serializer.serialize_str(""),
    }
}
