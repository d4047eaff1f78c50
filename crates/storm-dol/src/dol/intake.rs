use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::domain::{UnresolvedLocationPolicy, WeatherEvent};
use crate::geo::{centroid, GeoPoint};

/// Reasons an event is held back from scoring.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum EventRejection {
    #[error("time_utc '{time_utc}' does not begin with a YYYY-MM-DD date")]
    MalformedTimestamp { time_utc: String },
    #[error("magnitude {magnitude} is not a finite, non-negative value")]
    InvalidMagnitude { magnitude: f64 },
    #[error("event geometry could not be resolved to a location")]
    UnresolvedLocation,
}

/// An input event that was not scored, with the reason it was set aside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarantinedEvent {
    pub id: String,
    pub reason: EventRejection,
    pub detail: String,
}

impl QuarantinedEvent {
    fn new(id: &str, reason: EventRejection) -> Self {
        Self {
            id: id.to_string(),
            detail: reason.to_string(),
            reason,
        }
    }
}

/// Event that passed intake, with its calendar date and resolved location.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedEvent<'a> {
    pub event: &'a WeatherEvent,
    pub event_date: NaiveDate,
    pub location: Option<GeoPoint>,
}

/// Gatekeeper that turns caller-supplied events into scoreable ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventIntake {
    policy: UnresolvedLocationPolicy,
}

impl EventIntake {
    pub fn with_policy(policy: UnresolvedLocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnresolvedLocationPolicy {
        self.policy
    }

    pub fn admit<'a>(&self, event: &'a WeatherEvent) -> Result<ValidatedEvent<'a>, EventRejection> {
        let event_date =
            parse_event_date(&event.time_utc).ok_or_else(|| EventRejection::MalformedTimestamp {
                time_utc: event.time_utc.clone(),
            })?;

        if let Some(magnitude) = event.magnitude {
            if !magnitude.is_finite() || magnitude < 0.0 {
                return Err(EventRejection::InvalidMagnitude { magnitude });
            }
        }

        let location = event.geometry.as_ref().and_then(centroid);
        if location.is_none() && self.policy == UnresolvedLocationPolicy::Exclude {
            return Err(EventRejection::UnresolvedLocation);
        }

        Ok(ValidatedEvent {
            event,
            event_date,
            location,
        })
    }

    /// Split a batch into admitted events and quarantined ones, preserving order.
    pub fn partition<'a>(
        &self,
        events: &'a [WeatherEvent],
    ) -> (Vec<ValidatedEvent<'a>>, Vec<QuarantinedEvent>) {
        let mut admitted = Vec::with_capacity(events.len());
        let mut quarantined = Vec::new();

        for event in events {
            match self.admit(event) {
                Ok(validated) => admitted.push(validated),
                Err(reason) => {
                    warn!(event_id = %event.id, %reason, "quarantined weather event");
                    quarantined.push(QuarantinedEvent::new(&event.id, reason));
                }
            }
        }

        (admitted, quarantined)
    }
}

/// Calendar date from the leading `YYYY-MM-DD` of an ISO-8601 timestamp.
pub fn parse_event_date(time_utc: &str) -> Option<NaiveDate> {
    let prefix = time_utc.get(..10)?;
    let shaped = prefix.bytes().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
