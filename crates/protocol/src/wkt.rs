//! Well-Known Text rendering for markers and polygons.
//!
//! Coordinates are written with `f64`'s shortest round-trip `Display`, so the
//! service sees exactly the values it must echo back for matching.

use foundation::LonLat;
use scene::Polygon;

pub fn point(position: LonLat) -> String {
    format!("POINT({} {})", position.lon, position.lat)
}

/// Renders a closed `POLYGON((...))`, repeating the first vertex at the end.
pub fn polygon(polygon: &Polygon) -> String {
    let ring = polygon
        .closed_ring()
        .map(|v| format!("{} {}", v.lon, v.lat))
        .collect::<Vec<_>>()
        .join(", ");
    format!("POLYGON(({ring}))")
}

#[cfg(test)]
mod tests {
    use super::{point, polygon};
    use foundation::{LonLat, PolygonId, Timestamp};
    use scene::Polygon;

    #[test]
    fn point_uses_raw_values() {
        assert_eq!(point(LonLat::new(10.0, 20.0)), "POINT(10 20)");
        assert_eq!(
            point(LonLat::new(-73.98765432101, 40.5)),
            "POINT(-73.98765432101 40.5)"
        );
    }

    #[test]
    fn polygon_ring_is_closed() {
        let poly = Polygon::new(
            PolygonId::new(0),
            vec![
                LonLat::new(0.0, 0.0),
                LonLat::new(0.0, 1.5),
                LonLat::new(1.0, 1.0),
            ],
            Timestamp(0),
        )
        .unwrap();
        assert_eq!(polygon(&poly), "POLYGON((0 0, 0 1.5, 1 1, 0 0))");
    }
}
