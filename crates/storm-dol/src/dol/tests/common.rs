use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::config::AnalysisConfig;
use crate::dol::domain::{EventKind, PropertyContext, UnresolvedLocationPolicy, WeatherEvent};
use crate::dol::{dol_router, DolAnalyzer};
use crate::geo::{GeoPoint, Geometry, EARTH_RADIUS_MILES};

/// Moore, OK: the insured property used across fixtures.
pub(super) fn property() -> PropertyContext {
    PropertyContext::new(35.3395, -97.4867)
}

/// Point `miles` due north of the property.
pub(super) fn north_of_property(miles: f64) -> GeoPoint {
    let origin = property().location;
    let degrees = (miles / EARTH_RADIUS_MILES).to_degrees();
    GeoPoint::new(origin.lat + degrees, origin.lon)
}

pub(super) fn event_at(
    id: &str,
    kind: EventKind,
    magnitude: Option<f64>,
    time_utc: &str,
    location: GeoPoint,
) -> WeatherEvent {
    WeatherEvent {
        id: id.to_string(),
        kind,
        magnitude,
        time_utc: time_utc.to_string(),
        geometry: Some(Geometry::point(location.lat, location.lon)),
        source: "spc_storm_reports".to_string(),
    }
}

pub(super) fn hail(id: &str, inches: f64, time_utc: &str, miles_north: f64) -> WeatherEvent {
    event_at(
        id,
        EventKind::HailReport,
        Some(inches),
        time_utc,
        north_of_property(miles_north),
    )
}

pub(super) fn wind(id: &str, mph: f64, time_utc: &str, miles_north: f64) -> WeatherEvent {
    event_at(
        id,
        EventKind::WindReport,
        Some(mph),
        time_utc,
        north_of_property(miles_north),
    )
}

/// Warning polygon: a square of half-width `half_deg` centred on the property.
pub(super) fn warning_over_property(id: &str, kind: EventKind, time_utc: &str) -> WeatherEvent {
    let origin = property().location;
    let half_deg = 0.05;
    let ring = [
        GeoPoint::new(origin.lat - half_deg, origin.lon - half_deg),
        GeoPoint::new(origin.lat - half_deg, origin.lon + half_deg),
        GeoPoint::new(origin.lat + half_deg, origin.lon + half_deg),
        GeoPoint::new(origin.lat + half_deg, origin.lon - half_deg),
    ];

    WeatherEvent {
        id: id.to_string(),
        kind,
        magnitude: None,
        time_utc: time_utc.to_string(),
        geometry: Some(Geometry::polygon(&ring)),
        source: "nws_warnings".to_string(),
    }
}

pub(super) fn without_geometry(mut event: WeatherEvent) -> WeatherEvent {
    event.geometry = None;
    event
}

pub(super) fn analysis_config(policy: UnresolvedLocationPolicy) -> AnalysisConfig {
    AnalysisConfig {
        unresolved_location: policy,
        parallel_batches: true,
        max_batch_size: 3,
    }
}

pub(super) fn analyzer() -> Arc<DolAnalyzer> {
    Arc::new(DolAnalyzer::new(analysis_config(
        UnresolvedLocationPolicy::Exclude,
    )))
}

pub(super) fn router() -> axum::Router {
    dol_router(analyzer())
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
