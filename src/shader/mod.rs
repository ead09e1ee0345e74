//! Shader-facing data layouts
//!
//! The Rust structs in [`types`] and the WGSL declarations below describe the
//! same memory. Field order, widths and padding must stay in sync.

pub mod types;

pub use types::*;

/// WGSL declarations matching [`ConstantInput`], [`InstanceInput`] and
/// [`VertexInput`].
pub const SHADER_INPUTS_WGSL: &str = r#"
struct ConstantInput {
    eye: vec3<f32>,
}

struct InstanceInput {
    model_matrix: mat4x4<f32>,
    normal_matrix: mat3x3<f32>,
    model_view_projection_matrix: mat4x4<f32>,
    color: vec3<f32>,
    power: f32,
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}
"#;
