use ::geo::{Bearing, Distance, Haversine, Point};

use super::GeoPoint;

/// Radius used by `geo`'s haversine metric.
const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;
const METERS_PER_MILE: f64 = 1609.344;

/// Mean Earth radius in statute miles (3958.7613).
pub const EARTH_RADIUS_MILES: f64 = MEAN_EARTH_RADIUS_METERS / METERS_PER_MILE;

/// Great-circle distance in miles on a spherical Earth.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    Haversine::distance(Point::from(a), Point::from(b)) / METERS_PER_MILE
}

/// Initial great-circle bearing from `a` towards `b`, in `[0, 360)`.
///
/// Coincident points resolve to `0.0` (north).
pub fn bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let normalized = Haversine::bearing(Point::from(a), Point::from(b)).rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}
