//! Serializes a `StateSnapshot` into the text sent alongside a user command.
//!
//! Multi-select snapshots produce a textual WKT context; single-select
//! snapshots produce the structured variant with embedded GeoJSON features.

use scene::{Marker, Selection, StateSnapshot};
use serde_json::{Value, json};

use crate::wkt;

/// Separates the raw command from its context.
pub const CONTEXT_SEPARATOR: &str = "\n\nContext: ";

pub const SELECTED_CLAUSE: &str = "User's Point: ";
pub const CANDIDATE_POINTS_CLAUSE: &str = "Distances should be calculated with these points: ";
pub const CANDIDATE_POLYGONS_CLAUSE: &str = "Candidate polygons: ";

const CLAUSE_SEPARATOR: &str = ". ";
const LIST_SEPARATOR: &str = ", ";

/// Reasons a command is not sent. Neither is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    EmptyCommand,
    NoSelection,
}

/// Builds the `/process` input for `command`.
///
/// The command is checked after trimming but sent verbatim.
pub fn build_input(command: &str, snapshot: &StateSnapshot) -> Result<String, Skip> {
    if command.trim().is_empty() {
        return Err(Skip::EmptyCommand);
    }
    if snapshot.selection.is_empty() {
        return Err(Skip::NoSelection);
    }
    let context = match snapshot.selection {
        Selection::Multi(_) => describe(snapshot),
        Selection::Single(_) => describe_structured(snapshot),
    };
    Ok(format!("{command}{CONTEXT_SEPARATOR}{context}"))
}

/// Textual context: selected points, other candidate points, candidate
/// polygons. Empty clauses are omitted along with their separator.
pub fn describe(snapshot: &StateSnapshot) -> String {
    let selected = join_points(&snapshot.selected());
    let unselected = join_points(&snapshot.unselected());
    let polygons = snapshot
        .polygons
        .iter()
        .map(wkt::polygon)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);

    [
        (SELECTED_CLAUSE, selected),
        (CANDIDATE_POINTS_CLAUSE, unselected),
        (CANDIDATE_POLYGONS_CLAUSE, polygons),
    ]
    .into_iter()
    .filter(|(_, body)| !body.is_empty())
    .map(|(label, body)| format!("{label}{body}"))
    .collect::<Vec<_>>()
    .join(CLAUSE_SEPARATOR)
}

/// Structured context for single-select mode.
///
/// `Selected point: <Feature>. Other points: <FeatureCollection>. Total points: <n>`
pub fn describe_structured(snapshot: &StateSnapshot) -> String {
    let selected = snapshot
        .selected()
        .first()
        .map(point_feature)
        .unwrap_or(Value::Null);
    let others = json!({
        "type": "FeatureCollection",
        "features": snapshot.unselected().iter().map(point_feature).collect::<Vec<_>>(),
    });
    format!(
        "Selected point: {selected}{CLAUSE_SEPARATOR}Other points: {others}{CLAUSE_SEPARATOR}Total points: {}",
        snapshot.markers.len()
    )
}

fn join_points(markers: &[Marker]) -> String {
    markers
        .iter()
        .map(|m| wkt::point(m.position))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

fn point_feature(marker: &Marker) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": marker.position.to_array(),
        },
        "properties": {
            "timestamp": marker.timestamp.as_millis(),
        },
    })
}
