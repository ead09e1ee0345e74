//! Mesh resources
//!
//! Generates the icosphere mesh consumed by the rendering pipeline.

mod icosphere;
mod mesh;

pub use icosphere::*;
pub use mesh::*;
