//! Date-of-loss analysis: intake validation, event scoring, and date selection.

pub mod domain;
pub mod import;
pub mod intake;
pub mod router;
pub mod scoring;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    EventKind, PropertyContext, ScoreComponent, ScoreFactor, ScoredEvent,
    UnresolvedLocationPolicy, WeatherEvent,
};
pub use import::{EventImportError, EventImporter};
pub use intake::{parse_event_date, EventIntake, EventRejection, QuarantinedEvent, ValidatedEvent};
pub use router::{dol_router, AnalyzeRequest, BatchAnalyzeRequest, BatchAnalyzeResponse};
pub use scoring::{
    magnitude_score, proximity_score, score_event, score_events_for_property, ScoringEngine,
    ScoringOutcome,
};
pub use selection::{pick_dol, DolResult, EventSummary, CONFIDENCE_CALIBRATION, TOP_EVENT_LIMIT};
pub use service::{AnalysisError, ClaimAnalysis, ClaimAnalysisRequest, DolAnalysis, DolAnalyzer};
