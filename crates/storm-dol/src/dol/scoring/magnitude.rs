use super::super::domain::{EventKind, ScoreComponent, ScoreFactor, WeatherEvent};

const HAIL_POINTS_PER_INCH: f64 = 10.0;
const HAIL_CAP: f64 = 50.0;
const WIND_MPH_PER_POINT: f64 = 10.0;
const WIND_CAP: f64 = 30.0;
const TORNADO_WARNING_POINTS: f64 = 40.0;
const SEVERE_WARNING_POINTS: f64 = 25.0;
const FLASH_FLOOD_WARNING_POINTS: f64 = 20.0;
const FALLBACK_POINTS: f64 = 5.0;

/// Severity contribution of an event, dispatched on its kind.
pub fn magnitude_score(event: &WeatherEvent) -> f64 {
    magnitude_component(event).score
}

pub(crate) fn magnitude_component(event: &WeatherEvent) -> ScoreComponent {
    let (score, notes) = match (&event.kind, event.magnitude) {
        (EventKind::HailReport, Some(inches)) => {
            let score = (inches * HAIL_POINTS_PER_INCH).max(0.0).min(HAIL_CAP);
            (score, format!("{inches:.2} in hail"))
        }
        (EventKind::WindReport, Some(mph)) => {
            let score = (mph / WIND_MPH_PER_POINT).max(0.0).min(WIND_CAP);
            (score, format!("{mph:.0} mph wind"))
        }
        (EventKind::TornadoWarning, _) => (TORNADO_WARNING_POINTS, "tornado warning".to_string()),
        (EventKind::SevereThunderstormWarning, _) => (
            SEVERE_WARNING_POINTS,
            "severe thunderstorm warning".to_string(),
        ),
        (EventKind::FlashFloodWarning, _) => (
            FLASH_FLOOD_WARNING_POINTS,
            "flash flood warning".to_string(),
        ),
        (EventKind::HailReport | EventKind::WindReport, None) => (
            FALLBACK_POINTS,
            format!("{} without reported magnitude", event.kind),
        ),
        (EventKind::Other(label), _) => (FALLBACK_POINTS, format!("unrecognized type '{label}'")),
    };

    ScoreComponent {
        factor: ScoreFactor::Magnitude,
        score,
        notes,
    }
}
