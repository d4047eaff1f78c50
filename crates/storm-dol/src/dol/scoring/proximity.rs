use super::super::domain::{ScoreComponent, ScoreFactor};

/// Distance contribution in points.
///
/// Piecewise linear with deliberate jumps: the curve steps up from 10 to 15
/// just past 5 miles and from 5 to 10 just past 10 miles. The breakpoints are
/// calibrated and must not be smoothed.
pub fn proximity_score(distance_miles: f64) -> f64 {
    let d = distance_miles;
    if d <= 1.0 {
        50.0
    } else if d <= 5.0 {
        30.0 - (d - 1.0) * 5.0
    } else if d <= 10.0 {
        15.0 - (d - 5.0) * 2.0
    } else if d <= 20.0 {
        (10.0 - (d - 10.0)).max(0.0)
    } else {
        0.0
    }
}

pub(crate) fn proximity_component(distance_miles: Option<f64>) -> ScoreComponent {
    let (score, notes) = match distance_miles {
        Some(miles) => (proximity_score(miles), format!("{miles:.2} mi from property")),
        None => (0.0, "location unresolved, scored beyond range".to_string()),
    };

    ScoreComponent {
        factor: ScoreFactor::Proximity,
        score,
        notes,
    }
}
