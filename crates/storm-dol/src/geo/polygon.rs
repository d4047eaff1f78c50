use super::{GeoPoint, Geometry};

/// Representative point for a geometry, or `None` when it cannot be located.
///
/// Polygons resolve to the plain average of their outer-ring vertices rather
/// than an area-weighted centroid. A ring that repeats its first vertex at
/// the end counts that vertex twice.
pub fn centroid(geometry: &Geometry) -> Option<GeoPoint> {
    match geometry {
        Geometry::Point { coordinates } => {
            Some(GeoPoint::from_position(*coordinates)).filter(GeoPoint::is_valid)
        }
        Geometry::Polygon { .. } => {
            let ring = geometry.outer_ring()?;
            if !ring.iter().all(GeoPoint::is_valid) {
                return None;
            }

            let count = ring.len() as f64;
            let (lat_sum, lon_sum) = ring
                .iter()
                .fold((0.0, 0.0), |(lat, lon), point| (lat + point.lat, lon + point.lon));

            Some(GeoPoint::new(lat_sum / count, lon_sum / count))
        }
        Geometry::Unsupported => None,
    }
}

/// Even-odd ray casting against a single ring. Holes are not considered.
///
/// Interior points agree with `geo::Contains`; points on an edge follow the
/// ray-casting result instead of being treated as outside.
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lon, ring[i].lat);
        let (xj, yj) = (ring[j].lon, ring[j].lat);

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
