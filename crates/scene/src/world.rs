use foundation::{Clock, IdAllocator, LonLat, MarkerId, PolygonId, SystemClock};
use tracing::{debug, warn};

use crate::entity::{MIN_POLYGON_VERTICES, Marker, Polygon};
use crate::error::SceneError;
use crate::selection::{Selection, SelectionMode};

/// The single owner of client map state.
///
/// Rendering and serialization read through `&MapState` (or a `StateSnapshot`);
/// every mutation goes through one of the `on_*` transitions below.
pub struct MapState {
    ids: IdAllocator,
    clock: Box<dyn Clock>,
    markers: Vec<Marker>,
    selection: Selection,
    highlighted: Vec<MarkerId>,
    polygons: Vec<Polygon>,
}

/// Owned copy of the state a command is serialized from.
///
/// Captured at dispatch time; later clicks do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub markers: Vec<Marker>,
    pub selection: Selection,
    pub polygons: Vec<Polygon>,
}

impl StateSnapshot {
    /// Selected markers in selection order.
    pub fn selected(&self) -> Vec<Marker> {
        collect_ids(&self.markers, self.selection.ids())
    }

    /// Markers not selected, in creation order.
    pub fn unselected(&self) -> Vec<Marker> {
        self.markers
            .iter()
            .filter(|m| !self.selection.contains(m.id))
            .copied()
            .collect()
    }
}

impl std::fmt::Debug for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState")
            .field("markers", &self.markers.len())
            .field("selection", &self.selection)
            .field("highlighted", &self.highlighted)
            .field("polygons", &self.polygons.len())
            .finish()
    }
}

impl MapState {
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_clock(mode, Box::new(SystemClock))
    }

    pub fn with_clock(mode: SelectionMode, clock: Box<dyn Clock>) -> Self {
        Self {
            ids: IdAllocator::new(),
            clock,
            markers: Vec::new(),
            selection: Selection::new(mode),
            highlighted: Vec::new(),
            polygons: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_markers(&self) -> Vec<Marker> {
        collect_ids(&self.markers, self.selection.ids())
    }

    pub fn is_selected(&self, id: MarkerId) -> bool {
        self.selection.contains(id)
    }

    pub fn highlighted(&self) -> &[MarkerId] {
        &self.highlighted
    }

    pub fn is_highlighted(&self, id: MarkerId) -> bool {
        self.highlighted.contains(&id)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            markers: self.markers.clone(),
            selection: self.selection.clone(),
            polygons: self.polygons.clone(),
        }
    }

    /// Handles a click on empty map space.
    ///
    /// `None` (click outside the map surface) is a no-op. Otherwise a marker is
    /// created and highlights are cleared; in single mode the new marker also
    /// becomes the selection.
    pub fn on_map_click(&mut self, coordinate: Option<LonLat>) -> Option<MarkerId> {
        let position = coordinate?;
        let marker = Marker::new(self.ids.marker(), position, self.clock.now());
        self.markers.push(marker);
        self.highlighted.clear();
        self.selection.select_only(marker.id);
        debug!(
            marker = %marker.id,
            lon = position.lon,
            lat = position.lat,
            "marker created"
        );
        Some(marker.id)
    }

    /// Handles a click on an existing marker.
    ///
    /// Returns `false` if the marker is unknown, leaving state untouched.
    pub fn on_marker_click(&mut self, id: MarkerId) -> bool {
        if self.marker(id).is_none() {
            debug!(marker = %id, "click on unknown marker ignored");
            return false;
        }
        let selected = self.selection.toggle(id);
        if self.mode() == SelectionMode::Single {
            self.highlighted.clear();
        }
        debug!(marker = %id, selected, "marker toggled");
        true
    }

    /// Groups `points` (in the given order) into a new polygon and clears the
    /// selection. Fewer than three points leaves state untouched.
    pub fn on_polygon_create(&mut self, points: &[LonLat]) -> Result<PolygonId, SceneError> {
        let id = self.append_polygon(points.to_vec()).inspect_err(|err| {
            warn!("polygon not created: {err}");
        })?;
        self.selection.clear();
        Ok(id)
    }

    /// `on_polygon_create` over the currently selected markers, in selection order.
    pub fn on_polygon_create_from_selection(&mut self) -> Result<PolygonId, SceneError> {
        let points: Vec<LonLat> = self.selected_markers().iter().map(|m| m.position).collect();
        self.on_polygon_create(&points)
    }

    /// Positions of the given markers, failing on the first unknown id.
    pub fn positions_of(&self, ids: &[MarkerId]) -> Result<Vec<LonLat>, SceneError> {
        ids.iter()
            .map(|id| {
                self.marker(*id)
                    .map(|m| m.position)
                    .ok_or(SceneError::UnknownMarker(*id))
            })
            .collect()
    }

    /// Appends a polygon stamped with the current time. Selection is not touched.
    pub fn append_polygon(&mut self, vertices: Vec<LonLat>) -> Result<PolygonId, SceneError> {
        // Checked before allocating so a rejected ring does not consume an id.
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(SceneError::TooFewVertices {
                got: vertices.len(),
            });
        }
        let polygon = Polygon::new(self.ids.polygon(), vertices, self.clock.now())?;
        let id = polygon.id;
        debug!(polygon = %id, vertices = polygon.vertices().len(), "polygon added");
        self.polygons.push(polygon);
        Ok(id)
    }

    /// Replaces the highlighted set wholesale. Ids not naming a tracked marker
    /// and repeated ids are dropped; first occurrence wins.
    pub fn set_highlighted(&mut self, ids: impl IntoIterator<Item = MarkerId>) {
        let mut next: Vec<MarkerId> = Vec::new();
        for id in ids {
            if self.marker(id).is_some() && !next.contains(&id) {
                next.push(id);
            }
        }
        self.highlighted = next;
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    /// Switches selection mode, dropping the current selection and highlights.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode() == mode {
            return;
        }
        self.selection = Selection::new(mode);
        self.highlighted.clear();
        debug!(?mode, "selection mode changed");
    }
}

fn collect_ids(markers: &[Marker], ids: &[MarkerId]) -> Vec<Marker> {
    ids.iter()
        .filter_map(|id| markers.iter().find(|m| m.id == *id))
        .copied()
        .collect()
}
