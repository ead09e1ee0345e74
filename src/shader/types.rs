//! Fixed-layout data shared with the shader stage

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};
use static_assertions::const_assert_eq;
use std::mem::{offset_of, size_of};

/// Vertex attribute format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
    Uint32,
}

impl VertexFormat {
    pub fn size(&self) -> u64 {
        match self {
            VertexFormat::Float32 | VertexFormat::Uint32 => 4,
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// Vertex attribute description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub offset: u64,
}

/// Vertex buffer layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBufferLayout {
    pub array_stride: u64,
    pub step_mode: VertexStepMode,
    pub attributes: Vec<VertexAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexStepMode {
    Vertex,
    Instance,
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65536 vertices).
    Uint16,
    /// 32-bit unsigned integers (max ~4 billion vertices).
    #[default]
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// Largest vertex count every index of which is representable.
    pub fn max_vertices(&self) -> u64 {
        match self {
            Self::Uint16 => u16::MAX as u64 + 1,
            Self::Uint32 => u32::MAX as u64 + 1,
        }
    }
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
}

/// Front face winding, as seen from outside the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    Ccw,
    Cw,
}

/// Per-vertex shader input.
///
/// This is also the vertex record produced by the icosphere generator, so the
/// vertex buffer can be handed to the pipeline without conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexInput {
    pub position: Vec3,
    pub normal: Vec3,
}

impl VertexInput {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    pub fn layout() -> VertexBufferLayout {
        VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    format: VertexFormat::Float32x3,
                    offset: offset_of!(VertexInput, position) as u64,
                },
                VertexAttribute {
                    location: 1,
                    format: VertexFormat::Float32x3,
                    offset: offset_of!(VertexInput, normal) as u64,
                },
            ],
        }
    }
}

/// Per-draw constants
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ConstantInput {
    /// Camera position in world space
    pub eye: Vec3,
    pub _padding: f32,
}

impl ConstantInput {
    pub fn new(eye: Vec3) -> Self {
        Self {
            eye,
            _padding: 0.0,
        }
    }
}

/// Per-instance shader input
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceInput {
    pub model_matrix: Mat4,
    /// 3x3 matrix stored as three columns padded to 16 bytes each
    pub normal_matrix: [Vec4; 3],
    pub model_view_projection_matrix: Mat4,
    pub color: Vec3,
    /// Specular exponent
    pub power: f32,
}

impl InstanceInput {
    /// Build instance data for `model`, deriving the normal and MVP matrices.
    pub fn new(model: Mat4, view_projection: Mat4, color: Vec3, power: f32) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model_matrix: model,
            normal_matrix: [
                normal.x_axis.extend(0.0),
                normal.y_axis.extend(0.0),
                normal.z_axis.extend(0.0),
            ],
            model_view_projection_matrix: view_projection * model,
            color,
            power,
        }
    }

    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_cols(
            self.normal_matrix[0].truncate(),
            self.normal_matrix[1].truncate(),
            self.normal_matrix[2].truncate(),
        )
    }
}

const_assert_eq!(size_of::<VertexInput>(), 24);
const_assert_eq!(offset_of!(VertexInput, normal), 12);

const_assert_eq!(size_of::<ConstantInput>(), 16);

const_assert_eq!(size_of::<InstanceInput>(), 192);
const_assert_eq!(offset_of!(InstanceInput, normal_matrix), 64);
const_assert_eq!(offset_of!(InstanceInput, model_view_projection_matrix), 112);
const_assert_eq!(offset_of!(InstanceInput, color), 176);
const_assert_eq!(offset_of!(InstanceInput, power), 188);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_format() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint32.size(), 4);
        assert_eq!(IndexFormat::Uint16.max_vertices(), 65536);
        assert_eq!(IndexFormat::default(), IndexFormat::Uint32);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = VertexInput::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].location, 1);
        assert_eq!(layout.attributes[1].offset, 12);

        let covered: u64 = layout.attributes.iter().map(|a| a.format.size()).sum();
        assert_eq!(covered, layout.array_stride);
    }

    #[test]
    fn test_instance_identity() {
        let instance = InstanceInput::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ONE, 32.0);
        assert_eq!(instance.normal_matrix(), Mat3::IDENTITY);
        assert_eq!(instance.model_view_projection_matrix, Mat4::IDENTITY);
        assert_eq!(instance.normal_matrix[2], Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_instance_normal_matrix_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let instance = InstanceInput::new(model, Mat4::IDENTITY, Vec3::ONE, 1.0);
        let normal = instance.normal_matrix();
        assert!((normal.x_axis.x - 0.5).abs() < 1e-6);
        assert!((normal.y_axis.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_instance_mvp_order() {
        let model = Mat4::from_translation(Vec3::X);
        let view_projection = Mat4::from_scale(Vec3::splat(2.0));
        let instance = InstanceInput::new(model, view_projection, Vec3::ZERO, 1.0);
        let p = instance
            .model_view_projection_matrix
            .transform_point3(Vec3::ZERO);
        // Translate first, then scale
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_constant_input_bytes() {
        let constants = ConstantInput::new(Vec3::new(1.0, 2.0, 3.0));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&constants));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0]);
    }
}
