//! Client side of the command protocol: context serialization, wire types and
//! response reconciliation.

pub mod context;
pub mod reconcile;
pub mod wire;
pub mod wkt;

pub use context::{Skip, build_input};
pub use wire::*;
pub use reconcile::*;
