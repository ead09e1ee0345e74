//! Icosphere - procedural sphere mesh for a lit-sphere demo
//!
//! The crate produces two kinds of data for an external rendering pipeline:
//! - An icosphere [`Mesh`]: a unit sphere built by recursively subdividing an
//!   icosahedron, with a position + normal vertex buffer and a triangle-list
//!   index buffer
//! - Fixed-layout shader inputs ([`VertexInput`], [`InstanceInput`],
//!   [`ConstantInput`]) whose memory layout matches [`shader::SHADER_INPUTS_WGSL`]
//!
//! Generation is pure and deterministic: no shared state, safe to call from
//! any number of threads.

pub mod error;
pub mod resources;
pub mod shader;

pub use error::{MeshError, MeshResult};
pub use resources::{
    checked_subdivisions, create_icosphere, Face, IcosphereBuilder, Mesh,
    PRACTICAL_MAX_SUBDIVISIONS,
};
pub use shader::types::{
    ConstantInput, FrontFace, IndexFormat, InstanceInput, PrimitiveTopology, VertexInput,
};
