use foundation::{LonLat, MarkerId, PolygonId};
use scene::MapState;
use tracing::debug;

/// Feature reported by the map widget's picking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickedFeature {
    Marker(MarkerId),
    Polygon(PolygonId),
}

/// Raw events emitted by the map widget.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MapEvent {
    /// Click on the map surface. `None` when no coordinate could be resolved.
    Click(Option<LonLat>),
    Pick(PickedFeature),
}

/// Routes a map event to the matching state transition.
///
/// Returns `true` if state changed.
pub fn apply_map_event(state: &mut MapState, event: MapEvent) -> bool {
    match event {
        MapEvent::Click(coordinate) => state.on_map_click(coordinate).is_some(),
        MapEvent::Pick(PickedFeature::Marker(id)) => state.on_marker_click(id),
        MapEvent::Pick(PickedFeature::Polygon(id)) => {
            // Polygons are not selectable.
            debug!(polygon = %id, "polygon pick ignored");
            false
        }
    }
}
