pub mod input;
pub mod symbology;
pub mod vector;

pub use input::*;
pub use vector::*;
