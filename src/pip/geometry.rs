//! Great-circle distance and ray-casting containment.

use std::f64::consts::PI;

use crate::models::Location;

/// Mean Earth radius in meters used for haversine distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Great-circle distance between two locations, in meters
pub fn haversine(a: Location, b: Location) -> f64 {
    let d_lat = to_radians(b.lat - a.lat);
    let d_lng = to_radians(b.lng - a.lng);

    let h = (d_lat / 2.0).sin().powi(2)
        + to_radians(a.lat).cos() * to_radians(b.lat).cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Ray-casting point-in-polygon test.
///
/// The ring is treated as closed (the last point connects back to the first).
/// Rings with fewer than 3 points contain nothing. Points exactly on an edge
/// may classify either way.
pub fn contains_point(polygon: &[Location], p: Location) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for (i, vi) in polygon.iter().enumerate() {
        let vj = polygon[j];
        if (vi.lat > p.lat) != (vj.lat > p.lat)
            && p.lng < (vj.lng - vi.lng) * (p.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Coord, LineString, Point, Polygon};

    fn square() -> Vec<Location> {
        vec![
            Location::new(0.0, 0.0),
            Location::new(0.0, 10.0),
            Location::new(10.0, 10.0),
            Location::new(10.0, 0.0),
        ]
    }

    fn to_geo(ring: &[Location]) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = ring
            .iter()
            .map(|l| Coord { x: l.lng, y: l.lat })
            .collect();
        Polygon::new(LineString::new(coords), vec![])
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let a = Location::new(55.75, 37.61);
        assert_eq!(haversine(a, a), 0.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Location::new(55.75, 37.61);
        let b = Location::new(-33.86, 151.21);
        assert_eq!(haversine(a, b), haversine(b, a));
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine(Location::new(0.0, 0.0), Location::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 111_195.0 * 0.005, "got {}", d);
    }

    #[test]
    fn test_haversine_quarter_meridian() {
        let d = haversine(Location::new(0.0, 0.0), Location::new(90.0, 0.0));
        assert!((d - EARTH_RADIUS_M * PI / 2.0).abs() < 1e-6);

        // along the equator one degree of longitude equals one degree of latitude
        let lng = haversine(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
        let lat = haversine(Location::new(0.0, 0.0), Location::new(1.0, 0.0));
        assert!((lng - lat).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_out_of_range_input() {
        // values are not clamped, the formula is applied as is
        let d = haversine(Location::new(0.0, 0.0), Location::new(0.0, 360.0));
        assert!(d < 1e-3, "got {}", d);
    }

    #[test]
    fn test_contains_point_square() {
        let ring = square();
        assert!(contains_point(&ring, Location::new(5.0, 5.0)));
        assert!(!contains_point(&ring, Location::new(15.0, 15.0)));
        assert!(!contains_point(&ring, Location::new(-1.0, 5.0)));
    }

    #[test]
    fn test_degenerate_rings_contain_nothing() {
        let p = Location::new(0.0, 0.0);
        assert!(!contains_point(&[], p));
        assert!(!contains_point(&[Location::new(0.0, 0.0)], p));
        assert!(!contains_point(
            &[Location::new(-1.0, -1.0), Location::new(1.0, 1.0)],
            p
        ));
    }

    #[test]
    fn test_explicitly_closed_ring() {
        let mut ring = square();
        ring.push(ring[0]);
        assert!(contains_point(&ring, Location::new(5.0, 5.0)));
        assert!(!contains_point(&ring, Location::new(5.0, 11.0)));
    }

    #[test]
    fn test_concave_ring_matches_geo() {
        // U shape opening to the north
        let ring = vec![
            Location::new(0.0, 0.0),
            Location::new(0.0, 9.0),
            Location::new(9.0, 9.0),
            Location::new(9.0, 6.0),
            Location::new(3.0, 6.0),
            Location::new(3.0, 3.0),
            Location::new(9.0, 3.0),
            Location::new(9.0, 0.0),
        ];
        let reference = to_geo(&ring);

        for lat in [0.5, 1.5, 4.5, 7.5, 8.5, 9.5] {
            for lng in [-0.5, 1.5, 4.5, 7.5, 9.5] {
                let p = Location::new(lat, lng);
                assert_eq!(
                    contains_point(&ring, p),
                    reference.contains(&Point::new(lng, lat)),
                    "mismatch at {:?}",
                    p
                );
            }
        }
        assert!(!contains_point(&ring, Location::new(5.0, 4.5)));
        assert!(contains_point(&ring, Location::new(5.0, 1.5)));
    }
}
