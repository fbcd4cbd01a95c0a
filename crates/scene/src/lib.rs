pub mod entity;
pub mod error;
pub mod selection;
pub mod world;

pub use entity::*;
pub use error::*;
pub use selection::*;
pub use world::*;
