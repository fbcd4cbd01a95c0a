use foundation::{LonLat, MarkerId, PolygonId, Timestamp};
use scene::MapState;

use crate::symbology::{PointStyle, PolygonStyle, Rgba};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointFeature {
    pub marker: MarkerId,
    pub position: LonLat,
    pub timestamp: Timestamp,
    pub fill: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    pub polygon: PolygonId,
    /// Closed ring: the first vertex is repeated at the end.
    pub ring: Vec<LonLat>,
    pub fill: Rgba,
    pub line: Rgba,
    pub line_width_px: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct VectorLayerSnapshot {
    pub points: Vec<PointFeature>,
    pub polygons: Vec<PolygonFeature>,
}

/// Read-only projection of markers and polygons into renderable features.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct VectorLayer {
    points: PointStyle,
    polygons: PolygonStyle,
}

impl VectorLayer {
    /// Points in marker creation order, polygons in append order.
    pub fn extract(&self, state: &MapState) -> VectorLayerSnapshot {
        let points = state
            .markers()
            .iter()
            .map(|m| PointFeature {
                marker: m.id,
                position: m.position,
                timestamp: m.timestamp,
                fill: self
                    .points
                    .fill(state.is_highlighted(m.id), state.is_selected(m.id)),
            })
            .collect();

        let polygons = state
            .polygons()
            .iter()
            .map(|p| PolygonFeature {
                polygon: p.id,
                ring: p.closed_ring().collect(),
                fill: self.polygons.fill,
                line: self.polygons.line,
                line_width_px: self.polygons.line_width_px,
            })
            .collect();

        VectorLayerSnapshot { points, polygons }
    }
}
