mod magnitude;
mod proximity;

pub use magnitude::magnitude_score;
pub use proximity::proximity_score;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{PropertyContext, ScoredEvent, UnresolvedLocationPolicy, WeatherEvent};
use super::intake::{EventIntake, QuarantinedEvent, ValidatedEvent};
use super::selection::{pick_dol, DolResult};
use crate::geo::{bearing_degrees, cardinal_direction, haversine_distance, point_in_polygon};

/// Stateless scorer; the only setting is how unresolved locations are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    intake: EventIntake,
}

impl ScoringEngine {
    pub fn new(policy: UnresolvedLocationPolicy) -> Self {
        Self {
            intake: EventIntake::with_policy(policy),
        }
    }

    pub fn policy(&self) -> UnresolvedLocationPolicy {
        self.intake.policy()
    }

    /// Score every admissible event and index the best score per calendar day.
    pub fn score(&self, events: &[WeatherEvent], property: &PropertyContext) -> ScoringOutcome {
        let (admitted, quarantined) = self.intake.partition(events);
        let mut scored = Vec::with_capacity(admitted.len());
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for validated in &admitted {
            let event = score_event(validated, property);
            by_date
                .entry(event.event_date)
                .and_modify(|best| {
                    if event.score > *best {
                        *best = event.score;
                    }
                })
                .or_insert(event.score);
            scored.push(event);
        }

        ScoringOutcome {
            scored,
            by_date,
            quarantined,
            events_scanned: events.len(),
        }
    }
}

/// Scored events plus the per-day maximum index used for date selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub scored: Vec<ScoredEvent>,
    pub by_date: BTreeMap<NaiveDate, f64>,
    pub quarantined: Vec<QuarantinedEvent>,
    pub events_scanned: usize,
}

impl ScoringOutcome {
    /// Pick the date of loss, counting quarantined events as scanned.
    pub fn select(&self) -> DolResult {
        let mut result = pick_dol(&self.scored, &self.by_date);
        result.total_events_scanned = self.events_scanned;
        result.events_quarantined = self.quarantined.len();
        result
    }
}

/// Place one admitted event relative to the property and score it.
pub fn score_event(validated: &ValidatedEvent<'_>, property: &PropertyContext) -> ScoredEvent {
    let event = validated.event;
    let origin = property.location;

    let (distance_miles, bearing_deg, direction_cardinal) = match validated.location {
        Some(location) => {
            let bearing = bearing_degrees(origin, location);
            (
                Some(haversine_distance(origin, location)),
                Some(bearing),
                Some(cardinal_direction(bearing)),
            )
        }
        None => (None, None, None),
    };

    let property_within_geometry = event
        .geometry
        .as_ref()
        .and_then(|geometry| geometry.outer_ring())
        .map(|ring| point_in_polygon(origin, &ring))
        .unwrap_or(false);

    let components = vec![
        magnitude::magnitude_component(event),
        proximity::proximity_component(distance_miles),
    ];
    let score: f64 = components.iter().map(|component| component.score).sum();

    debug!(
        event_id = %event.id,
        kind = %event.kind,
        distance_miles,
        score,
        "scored weather event"
    );

    ScoredEvent {
        event: event.clone(),
        event_date: validated.event_date,
        distance_miles,
        bearing_deg,
        direction_cardinal,
        property_within_geometry,
        components,
        score,
    }
}

/// Score with the default policy (unresolved locations excluded).
pub fn score_events_for_property(
    events: &[WeatherEvent],
    property: &PropertyContext,
) -> ScoringOutcome {
    ScoringEngine::default().score(events, property)
}
