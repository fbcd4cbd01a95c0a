//! Maps service geometry back onto tracked markers and new polygons.
//!
//! Points are matched by exact position against the marker snapshot taken
//! when the command was dispatched. Coordinates that match no marker are
//! dropped without error: the service may return points it was never given.

use foundation::{LonLat, MarkerId, PolygonId};
use scene::entity::{MIN_POLYGON_VERTICES, find_by_position};
use scene::{MapState, Marker};
use tracing::debug;

use crate::wire::{GeoJson, Geometry, ProcessResponse, RankedResponse};

/// Effects of one response, computed before touching state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reconciliation {
    /// Matched markers in response order, without repeats.
    pub highlighted: Vec<MarkerId>,
    /// Exterior rings of returned polygons, unclosed.
    pub polygons: Vec<Vec<LonLat>>,
    /// Returned points that matched no marker.
    pub unmatched: usize,
}

impl Reconciliation {
    /// Replaces highlights wholesale and appends the new polygons.
    pub fn apply(self, state: &mut MapState) -> Vec<PolygonId> {
        state.set_highlighted(self.highlighted);
        self.polygons
            .into_iter()
            .filter_map(|ring| state.append_polygon(ring).ok())
            .collect()
    }

    fn highlight(&mut self, markers: &[Marker], position: LonLat) {
        match find_by_position(markers, position) {
            Some(m) if !self.highlighted.contains(&m.id) => self.highlighted.push(m.id),
            Some(_) => {}
            None => self.unmatched += 1,
        }
    }
}

pub fn reconcile(response: &ProcessResponse, markers: &[Marker]) -> Reconciliation {
    let out = match response {
        ProcessResponse::GeoJson(geo) => reconcile_geojson(geo, markers),
        ProcessResponse::Ranked(ranked) => reconcile_ranked(ranked, markers),
    };
    if out.unmatched > 0 {
        debug!(unmatched = out.unmatched, "returned points without a marker");
    }
    out
}

pub fn reconcile_geojson(geo: &GeoJson, markers: &[Marker]) -> Reconciliation {
    let mut out = Reconciliation::default();
    for geometry in geo.geometries() {
        match geometry {
            Geometry::Point { coordinates } => {
                if let Some(position) = LonLat::from_slice(coordinates) {
                    out.highlight(markers, position);
                }
            }
            Geometry::Polygon { coordinates } => {
                let Some(exterior) = coordinates.first() else {
                    continue;
                };
                let mut ring: Vec<LonLat> = exterior
                    .iter()
                    .filter_map(|c| LonLat::from_slice(c))
                    .collect();
                drop_closing_duplicate(&mut ring);
                if ring.len() >= MIN_POLYGON_VERTICES {
                    out.polygons.push(ring);
                }
            }
            Geometry::Unsupported => {}
        }
    }
    out
}

/// Absent or empty `response` yields an empty highlight set.
pub fn reconcile_ranked(ranked: &RankedResponse, markers: &[Marker]) -> Reconciliation {
    let mut out = Reconciliation::default();
    for point in ranked.response.iter().flatten() {
        if let Some(position) = LonLat::from_slice(&point.coordinates) {
            out.highlight(markers, position);
        }
    }
    out
}

/// GeoJSON rings repeat their first vertex; polygons are stored open.
///
/// A ring of exactly `MIN_POLYGON_VERTICES` is kept as received.
fn drop_closing_duplicate(ring: &mut Vec<LonLat>) {
    if ring.len() > MIN_POLYGON_VERTICES && ring.first() == ring.last() {
        ring.pop();
    }
}
