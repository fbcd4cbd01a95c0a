use foundation::{LonLat, MarkerId, PolygonId, Timestamp};

use crate::error::SceneError;

/// Minimum vertex count of a polygon ring (before closing).
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A user-placed point. Immutable once created.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LonLat,
    pub timestamp: Timestamp,
}

impl Marker {
    pub fn new(id: MarkerId, position: LonLat, timestamp: Timestamp) -> Self {
        Self {
            id,
            position,
            timestamp,
        }
    }

    /// Local identity. Two markers placed at the same spot in the same
    /// millisecond are still distinct.
    pub fn same_identity(&self, other: &Marker) -> bool {
        self.id == other.id
    }

    /// Server-side match: the service only echoes coordinates, so the
    /// comparison is position-only and exact.
    pub fn matches_position(&self, position: LonLat) -> bool {
        self.position.lon == position.lon && self.position.lat == position.lat
    }
}

/// Returns the first marker (in creation order) sitting exactly at `position`.
pub fn find_by_position(markers: &[Marker], position: LonLat) -> Option<&Marker> {
    markers.iter().find(|m| m.matches_position(position))
}

/// An open vertex ring with at least three vertices.
///
/// The ring is stored unclosed; `closed_ring` repeats the first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub id: PolygonId,
    vertices: Vec<LonLat>,
    pub timestamp: Timestamp,
}

impl Polygon {
    pub fn new(
        id: PolygonId,
        vertices: Vec<LonLat>,
        timestamp: Timestamp,
    ) -> Result<Self, SceneError> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(SceneError::TooFewVertices {
                got: vertices.len(),
            });
        }
        Ok(Self {
            id,
            vertices,
            timestamp,
        })
    }

    pub fn vertices(&self) -> &[LonLat] {
        &self.vertices
    }

    /// Vertices followed by the first vertex again.
    pub fn closed_ring(&self) -> impl Iterator<Item = LonLat> + '_ {
        self.vertices.iter().chain(self.vertices.first()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, Polygon, find_by_position};
    use crate::error::SceneError;
    use foundation::{LonLat, MarkerId, PolygonId, Timestamp};

    fn marker(id: u64, lon: f64, lat: f64, t: i64) -> Marker {
        Marker::new(MarkerId::new(id), LonLat::new(lon, lat), Timestamp(t))
    }

    #[test]
    fn identity_ignores_coincident_position_and_time() {
        let a = marker(0, 1.0, 2.0, 5);
        let b = marker(1, 1.0, 2.0, 5);
        assert!(a.same_identity(&a));
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn position_match_is_exact_and_ignores_timestamp() {
        let a = marker(0, 1.0, 2.0, 5);
        assert!(a.matches_position(LonLat::new(1.0, 2.0)));
        assert!(!a.matches_position(LonLat::new(1.0, 2.000_000_000_1)));
    }

    #[test]
    fn find_by_position_returns_first_in_creation_order() {
        let markers = vec![
            marker(0, 3.0, 4.0, 1),
            marker(1, 1.0, 2.0, 2),
            marker(2, 1.0, 2.0, 3),
        ];
        let hit = find_by_position(&markers, LonLat::new(1.0, 2.0)).map(|m| m.id);
        assert_eq!(hit, Some(MarkerId::new(1)));
        assert!(find_by_position(&markers, LonLat::new(9.0, 9.0)).is_none());
    }

    #[test]
    fn polygon_requires_three_vertices() {
        let two = vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)];
        assert_eq!(
            Polygon::new(PolygonId::new(0), two, Timestamp(0)),
            Err(SceneError::TooFewVertices { got: 2 })
        );
    }

    #[test]
    fn closed_ring_repeats_first_vertex() {
        let ring = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(1.0, 1.0),
        ];
        let poly = Polygon::new(PolygonId::new(0), ring.clone(), Timestamp(0)).unwrap();
        let closed: Vec<LonLat> = poly.closed_ring().collect();
        assert_eq!(closed.len(), 4);
        assert_eq!(closed[3], ring[0]);
        assert_eq!(poly.vertices(), ring.as_slice());
    }
}
