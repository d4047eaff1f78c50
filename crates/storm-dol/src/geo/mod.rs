//! Spherical geometry primitives used to place storm reports relative to a property.

mod compass;
mod distance;
mod polygon;

pub use compass::{cardinal_direction, CardinalDirection};
pub use distance::{bearing_degrees, haversine_distance, EARTH_RADIUS_MILES};
pub use polygon::{centroid, point_in_polygon};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// GeoJSON positions are `[lon, lat]`.
    pub fn from_position(position: Position) -> Self {
        Self {
            lat: position[1],
            lon: position[0],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<GeoPoint> for ::geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        ::geo::Point::new(point.lon, point.lat)
    }
}

/// `[longitude, latitude]`, GeoJSON axis order. Altitude is dropped on input.
pub type Position = [f64; 2];

/// Event footprint as delivered by the upstream normalizer.
///
/// Parsed through `geojson`; anything that is not a well-formed Point or
/// Polygon becomes `Unsupported` instead of failing the surrounding payload.
/// Only the first ring of a polygon is consulted; interior rings are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point { coordinates: Position },
    Polygon { coordinates: Vec<Vec<Position>> },
    Unsupported,
}

impl Geometry {
    pub fn point(lat: f64, lon: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }

    pub fn polygon(ring: &[GeoPoint]) -> Self {
        Geometry::Polygon {
            coordinates: vec![ring.iter().map(|point| [point.lon, point.lat]).collect()],
        }
    }

    /// Outer ring as points, if this geometry is a polygon with one.
    pub fn outer_ring(&self) -> Option<Vec<GeoPoint>> {
        match self {
            Geometry::Polygon { coordinates } => coordinates
                .first()
                .filter(|ring| !ring.is_empty())
                .map(|ring| ring.iter().copied().map(GeoPoint::from_position).collect()),
            Geometry::Point { .. } | Geometry::Unsupported => None,
        }
    }

    fn to_geojson(&self) -> Option<geojson::Geometry> {
        let value = match self {
            Geometry::Point { coordinates } => geojson::Value::Point(coordinates.to_vec()),
            Geometry::Polygon { coordinates } => geojson::Value::Polygon(
                coordinates
                    .iter()
                    .map(|ring| ring.iter().map(|position| position.to_vec()).collect())
                    .collect(),
            ),
            Geometry::Unsupported => return None,
        };
        Some(geojson::Geometry::new(value))
    }
}

impl From<geojson::Value> for Geometry {
    fn from(value: geojson::Value) -> Self {
        let parsed = match value {
            geojson::Value::Point(position) => {
                planar(&position).map(|coordinates| Geometry::Point { coordinates })
            }
            geojson::Value::Polygon(rings) => rings
                .iter()
                .map(|ring| {
                    ring.iter()
                        .map(|position| planar(position))
                        .collect::<Option<Vec<Position>>>()
                })
                .collect::<Option<Vec<Vec<Position>>>>()
                .map(|coordinates| Geometry::Polygon { coordinates }),
            _ => None,
        };
        parsed.unwrap_or(Geometry::Unsupported)
    }
}

fn planar(position: &[f64]) -> Option<Position> {
    match position {
        [lon, lat, ..] => Some([*lon, *lat]),
        _ => None,
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_geojson() {
            Some(geometry) => geometry.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(serde_json::from_value::<geojson::Geometry>(raw)
            .map(|geometry| Geometry::from(geometry.value))
            .unwrap_or(Geometry::Unsupported))
    }
}
