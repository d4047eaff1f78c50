use crate::infra::{build_analyzer, parse_date, parse_latitude, parse_longitude};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use storm_dol::config::{AnalysisConfig, AppConfig};
use storm_dol::dol::{DolAnalysis, EventImporter, EventKind, PropertyContext, WeatherEvent};
use storm_dol::error::AppError;
use storm_dol::geo::{GeoPoint, Geometry, EARTH_RADIUS_MILES};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Property latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude)]
    pub(crate) lat: f64,
    /// Property longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude)]
    pub(crate) lon: f64,
    /// Normalized weather events (.json array or .csv point reports)
    #[arg(long)]
    pub(crate) events: PathBuf,
    /// Print the analysis as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Property latitude in decimal degrees. Defaults to Moore, OK.
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_latitude,
        default_value = "35.3395"
    )]
    pub(crate) lat: f64,
    /// Property longitude in decimal degrees. Defaults to Moore, OK.
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_longitude,
        default_value = "-97.4867"
    )]
    pub(crate) lon: f64,
    /// Day of the synthetic damaging storm (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) storm_day: Option<NaiveDate>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        lat,
        lon,
        events,
        json,
    } = args;

    let config = AppConfig::load()?;
    let events = EventImporter::from_path(&events)?;
    let property = PropertyContext::new(lat, lon);
    let analysis = build_analyzer(&config.analysis).analyze(&property, &events)?;

    if json {
        let rendered = serde_json::to_string_pretty(&analysis)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        println!("{rendered}");
    } else {
        render_analysis(&property, &analysis);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { lat, lon, storm_day } = args;

    let storm_day = storm_day.unwrap_or_else(|| Local::now().date_naive());
    let property = PropertyContext::new(lat, lon);
    let events = synthetic_storm_season(&property, storm_day);

    println!("Storm date-of-loss demo");
    println!(
        "- synthetic season of {} reports around the damaging storm on {}",
        events.len(),
        storm_day.format("%Y-%m-%d")
    );

    let analysis = build_analyzer(&AnalysisConfig::default()).analyze(&property, &events)?;
    render_analysis(&property, &analysis);

    Ok(())
}

fn render_analysis(property: &PropertyContext, analysis: &DolAnalysis) {
    let result = &analysis.result;

    println!(
        "\nDate of loss analysis for ({:.4}, {:.4})",
        property.location.lat, property.location.lon
    );
    println!(
        "- {} events scanned | {} quarantined",
        result.total_events_scanned, result.events_quarantined
    );

    if result.recommended_date_utc.is_none() {
        println!("- no date of loss could be recommended");
    } else {
        println!(
            "- recommended date of loss: {} ({:.0}% confidence)",
            result.recommended_date_label(),
            result.confidence * 100.0
        );
        println!("Supporting evidence:");
        for (rank, summary) in result.top_events.iter().enumerate() {
            let magnitude = summary
                .magnitude
                .map(|value| format!("{value}"))
                .unwrap_or_else(|| "-".to_string());
            let placement = match (summary.distance_miles, summary.direction_cardinal) {
                (Some(miles), Some(direction)) => format!("{miles:.2} mi {direction}"),
                _ => "location unresolved".to_string(),
            };
            let overhead = if summary.property_within_geometry {
                " | property inside footprint"
            } else {
                ""
            };
            println!(
                "  {}. {} {} {} | {} | score {:.1}{} | {} ({})",
                rank + 1,
                summary.id,
                summary.kind,
                magnitude,
                placement,
                summary.score,
                overhead,
                summary.time_utc,
                summary.source
            );
        }
    }

    if !analysis.quarantined.is_empty() {
        println!("Quarantined events:");
        for quarantined in &analysis.quarantined {
            println!("  - {}: {}", quarantined.id, quarantined.detail);
        }
    }
}

/// Offset `miles` from `origin` along a bearing, flat-earth approximation.
fn offset(origin: GeoPoint, miles: f64, bearing_deg: f64) -> GeoPoint {
    let angular = (miles / EARTH_RADIUS_MILES).to_degrees();
    let bearing = bearing_deg.to_radians();
    let lat = origin.lat + angular * bearing.cos();
    let lon = origin.lon + angular * bearing.sin() / origin.lat.to_radians().cos();
    GeoPoint::new(lat, lon)
}

fn utc_stamp(day: NaiveDate, time: &str) -> String {
    format!("{}T{time}Z", day.format("%Y-%m-%d"))
}

fn storm_report(
    id: &str,
    kind: EventKind,
    magnitude: Option<f64>,
    time_utc: String,
    location: GeoPoint,
) -> WeatherEvent {
    WeatherEvent {
        id: id.to_string(),
        kind,
        magnitude,
        time_utc,
        geometry: Some(Geometry::point(location.lat, location.lon)),
        source: "spc_storm_reports".to_string(),
    }
}

fn warning(id: &str, kind: EventKind, time_utc: String, ring: &[GeoPoint]) -> WeatherEvent {
    WeatherEvent {
        id: id.to_string(),
        kind,
        magnitude: None,
        time_utc,
        geometry: Some(Geometry::polygon(ring)),
        source: "nws_warnings".to_string(),
    }
}

pub(crate) fn synthetic_storm_season(
    property: &PropertyContext,
    storm_day: NaiveDate,
) -> Vec<WeatherEvent> {
    let origin = property.location;
    let early = storm_day - Duration::days(9);
    let late = storm_day + Duration::days(4);

    // (id, kind, magnitude, timestamp, miles from the property, bearing)
    let reports = [
        ("lsr-0101", EventKind::HailReport, 1.0, utc_stamp(early, "19:40:00"), 8.5, 300.0),
        ("lsr-0102", EventKind::WindReport, 65.0, utc_stamp(early, "20:10:00"), 14.0, 20.0),
        ("lsr-0201", EventKind::HailReport, 2.25, utc_stamp(storm_day, "21:22:00"), 0.6, 250.0),
        ("lsr-0202", EventKind::HailReport, 1.5, utc_stamp(storm_day, "21:31:00"), 2.4, 70.0),
        ("lsr-0203", EventKind::WindReport, 70.0, utc_stamp(storm_day, "21:40:00"), 4.2, 95.0),
        ("lsr-0301", EventKind::HailReport, 1.75, utc_stamp(late, "02:15:00"), 17.0, 180.0),
    ];

    let mut events: Vec<WeatherEvent> = reports
        .into_iter()
        .map(|(id, kind, magnitude, time_utc, miles, bearing)| {
            storm_report(id, kind, Some(magnitude), time_utc, offset(origin, miles, bearing))
        })
        .collect();

    let severe_ring = [
        offset(origin, 2.0, 225.0),
        offset(origin, 2.0, 135.0),
        offset(origin, 10.0, 45.0),
        offset(origin, 10.0, 315.0),
    ];
    events.push(warning(
        "nws-svr-0412",
        EventKind::SevereThunderstormWarning,
        utc_stamp(storm_day, "21:05:00"),
        &severe_ring,
    ));

    let flood_center = offset(origin, 11.0, 160.0);
    let flood_ring = [
        offset(flood_center, 3.0, 0.0),
        offset(flood_center, 3.0, 120.0),
        offset(flood_center, 3.0, 240.0),
    ];
    events.push(warning(
        "nws-ffw-0417",
        EventKind::FlashFloodWarning,
        utc_stamp(late, "03:00:00"),
        &flood_ring,
    ));

    let mut malformed = storm_report(
        "lsr-0999",
        EventKind::HailReport,
        Some(1.0),
        storm_day.format("%m/%d/%Y").to_string(),
        origin,
    );
    malformed.source = "manual_entry".to_string();
    events.push(malformed);

    events
}
