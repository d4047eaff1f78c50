use proptest::prelude::*;
use storm_dol::dol::{
    proximity_score, score_events_for_property, EventKind, PropertyContext, WeatherEvent,
};
use storm_dol::geo::{bearing_degrees, cardinal_direction, haversine_distance, GeoPoint, Geometry};

fn coordinate() -> impl Strategy<Value = GeoPoint> {
    (-89.9f64..89.9, -180.0f64..180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let forward = haversine_distance(a, b);
        let backward = haversine_distance(b, a);
        prop_assert!((forward - backward).abs() < 1e-9, "{} vs {}", forward, backward);
        prop_assert!(forward >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(haversine_distance(a, a), 0.0);
    }

    #[test]
    fn bearing_stays_in_range(a in coordinate(), b in coordinate()) {
        let bearing = bearing_degrees(a, b);
        prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
    }

    #[test]
    fn cardinal_label_is_never_empty(bearing in 0.0f64..360.0) {
        prop_assert!(!cardinal_direction(bearing).label().is_empty());
    }

    #[test]
    fn proximity_is_bounded(distance in 0.0f64..500.0) {
        let score = proximity_score(distance);
        prop_assert!((0.0..=50.0).contains(&score));
    }

    #[test]
    fn scoring_is_pure(
        origin in coordinate(),
        reports in prop::collection::vec((coordinate(), 0.0f64..5.0, 1u32..28), 0..12),
    ) {
        let property = PropertyContext { location: origin };
        let events: Vec<WeatherEvent> = reports
            .iter()
            .enumerate()
            .map(|(idx, (point, inches, day))| WeatherEvent {
                id: format!("h-{idx}"),
                kind: EventKind::HailReport,
                magnitude: Some(*inches),
                time_utc: format!("2024-06-{day:02}T12:00:00Z"),
                geometry: Some(Geometry::point(point.lat, point.lon)),
                source: "proptest".to_string(),
            })
            .collect();

        let first = score_events_for_property(&events, &property);
        let second = score_events_for_property(&events, &property);
        prop_assert_eq!(&first, &second);

        let result = first.select();
        prop_assert!(result.top_events.len() <= 10);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert_eq!(result.total_events_scanned, events.len());
        for event in &first.scored {
            prop_assert!(event.score >= 0.0);
            prop_assert!(event.distance_miles.map(|d| d >= 0.0).unwrap_or(false));
        }
    }
}
