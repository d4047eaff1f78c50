use std::collections::BTreeMap;

use super::common::*;
use crate::dol::domain::EventKind;
use crate::dol::{pick_dol, score_events_for_property, TOP_EVENT_LIMIT};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn empty_input_yields_empty_result() {
    let outcome = score_events_for_property(&[], &property());
    let result = outcome.select();

    assert_eq!(result.recommended_date_utc, None);
    assert_eq!(result.recommended_date_label(), "");
    assert!(result.top_events.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.total_events_scanned, 0);

    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["recommended_date_utc"], "");
}

#[test]
fn single_close_hail_report_sets_date_and_confidence() {
    let events = vec![hail("h-1", 1.5, "2024-06-01T10:00:00Z", 0.5)];

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.recommended_date_utc, Some(date(2024, 6, 1)));
    assert_eq!(result.recommended_date_label(), "2024-06-01");
    assert_close(result.confidence, 0.65);
    assert_eq!(result.total_events_scanned, 1);
    assert_eq!(result.top_events.len(), 1);

    let summary = &result.top_events[0];
    assert_eq!(summary.id, "h-1");
    assert_eq!(summary.kind, EventKind::HailReport);
    assert_eq!(summary.magnitude, Some(1.5));
    assert_eq!(summary.distance_miles, Some(0.5));
    assert_eq!(summary.time_utc, "2024-06-01T10:00:00Z");
    assert_eq!(summary.source, "spc_storm_reports");

    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["recommended_date_utc"], "2024-06-01");
    assert_eq!(json["top_events"][0]["type"], "hail_report");
    assert_eq!(json["top_events"][0]["direction_cardinal"], "N");
}

#[test]
fn one_severe_day_beats_many_weak_events() {
    let mut events = vec![hail("severe", 3.0, "2024-05-10T22:00:00Z", 0.3)];
    for idx in 0..5 {
        events.push(hail(
            &format!("weak-{idx}"),
            2.0,
            "2024-05-12T20:00:00Z",
            30.0,
        ));
    }

    let outcome = score_events_for_property(&events, &property());
    assert_close(outcome.by_date[&date(2024, 5, 10)], 80.0);
    assert_close(outcome.by_date[&date(2024, 5, 12)], 20.0);

    let result = outcome.select();
    assert_eq!(result.recommended_date_utc, Some(date(2024, 5, 10)));
    assert_eq!(result.top_events.len(), 1);
    assert_close(result.confidence, 0.8);
    assert_eq!(result.total_events_scanned, 6);
}

#[test]
fn top_events_are_capped_and_sorted() {
    let events: Vec<_> = (0..14)
        .map(|idx| {
            hail(
                &format!("h-{idx:02}"),
                0.75 + idx as f64 * 0.25,
                "2024-07-04T18:00:00Z",
                2.0 + idx as f64,
            )
        })
        .collect();

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.top_events.len(), TOP_EVENT_LIMIT);
    assert!(result
        .top_events
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn top_events_cover_only_the_winning_day() {
    let events = vec![
        hail("win-a", 2.0, "2024-08-01T01:00:00Z", 0.1),
        hail("win-b", 1.0, "2024-08-01T02:00:00Z", 6.0),
        hail("other", 1.75, "2024-08-02T03:00:00Z", 0.1),
    ];

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.recommended_date_utc, Some(date(2024, 8, 1)));
    let ids: Vec<&str> = result.top_events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["win-a", "win-b"]);
    assert_eq!(result.total_events_scanned, 3);
}

#[test]
fn equal_day_maxima_resolve_to_earliest_date() {
    let events = vec![
        hail("later", 2.0, "2024-09-03T12:00:00Z", 0.2),
        hail("earlier", 2.0, "2024-09-01T12:00:00Z", 0.2),
    ];

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.recommended_date_utc, Some(date(2024, 9, 1)));
}

#[test]
fn equal_event_scores_keep_input_order() {
    let events = vec![
        hail("first", 2.0, "2024-09-01T12:00:00Z", 0.2),
        hail("second", 2.0, "2024-09-01T13:00:00Z", 0.4),
    ];

    let result = score_events_for_property(&events, &property()).select();

    let ids: Vec<&str> = result.top_events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn confidence_saturates_at_one() {
    let events = vec![hail("giant", 6.0, "2024-06-10T00:00:00Z", 0.1)];

    let result = score_events_for_property(&events, &property()).select();

    assert_close(result.confidence, 1.0);
}

#[test]
fn quarantined_events_count_as_scanned() {
    let events = vec![
        hail("good", 1.0, "2024-06-10T00:00:00Z", 0.1),
        hail("bad-date", 1.0, "June 10", 0.1),
        without_geometry(hail("no-geometry", 1.0, "2024-06-10T00:00:00Z", 0.1)),
    ];

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.total_events_scanned, 3);
    assert_eq!(result.events_quarantined, 2);
    assert_eq!(result.top_events.len(), 1);
}

#[test]
fn distances_are_rounded_to_hundredths() {
    let events = vec![hail("h-1", 1.0, "2024-06-10T00:00:00Z", 3.14159)];

    let result = score_events_for_property(&events, &property()).select();

    assert_eq!(result.top_events[0].distance_miles, Some(3.14));
}

#[test]
fn pick_dol_on_empty_index_reports_scored_count() {
    let result = pick_dol(&[], &BTreeMap::new());

    assert_eq!(result.recommended_date_utc, None);
    assert_eq!(result.total_events_scanned, 0);
    assert_eq!(result.confidence, 0.0);
}
