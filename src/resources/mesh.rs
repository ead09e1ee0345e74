//! Indexed triangle mesh produced by the generators

use crate::error::{MeshError, MeshResult};
use crate::shader::types::{FrontFace, IndexFormat, PrimitiveTopology, VertexInput};

/// Three vertex indices forming one triangle, in winding order.
pub type Face = [u32; 3];

/// An indexed triangle-list mesh.
///
/// Vertices are stored in index order, indices are grouped three per face.
/// Meshes are immutable once built; every accessor borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<VertexInput>,
    indices: Vec<u32>,
    index_format: IndexFormat,
    topology: PrimitiveTopology,
    front_face: FrontFace,
    name: String,
}

static_assertions::assert_impl_all!(Mesh: Send, Sync);

impl Mesh {
    pub(crate) fn new(
        name: impl Into<String>,
        vertices: Vec<VertexInput>,
        indices: Vec<u32>,
        index_format: IndexFormat,
        front_face: FrontFace,
    ) -> Self {
        Self {
            vertices,
            indices,
            index_format,
            topology: PrimitiveTopology::TriangleList,
            front_face,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[VertexInput] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index format the mesh was built for.
    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn front_face(&self) -> FrontFace {
        self.front_face
    }

    /// Calculate vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Calculate index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Calculate triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over the triangles of the index buffer.
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|face| [face[0], face[1], face[2]])
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as 32-bit bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Index data encoded in [`Mesh::index_format`].
    pub fn index_data(&self) -> MeshResult<Vec<u8>> {
        match self.index_format {
            IndexFormat::Uint16 => Ok(bytemuck::cast_slice(&self.indices_u16()?).to_vec()),
            IndexFormat::Uint32 => Ok(self.index_bytes().to_vec()),
        }
    }

    /// Narrow the index buffer to 16 bits.
    pub fn indices_u16(&self) -> MeshResult<Vec<u16>> {
        if self.vertices.len() as u64 > IndexFormat::Uint16.max_vertices() {
            return Err(MeshError::CapacityExceeded {
                vertex_count: self.vertices.len() as u64,
                format: IndexFormat::Uint16,
            });
        }
        self.indices
            .iter()
            .map(|&index| {
                u16::try_from(index).map_err(|_| MeshError::IndexOutOfRange {
                    index,
                    vertex_count: self.vertices.len(),
                })
            })
            .collect()
    }

    /// Check that the index buffer forms whole triangles over existing vertices.
    pub fn validate(&self) -> MeshResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}
