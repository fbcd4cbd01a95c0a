use foundation::MarkerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("a polygon needs at least 3 points, got {got}")]
    TooFewVertices { got: usize },

    #[error("unknown marker {0}")]
    UnknownMarker(MarkerId),
}
