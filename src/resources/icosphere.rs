//! Icosphere generation.
//!
//! An icosphere starts as a regular icosahedron whose triangles are split into
//! four, `n` times over. Each split inserts the midpoints of the triangle's
//! edges; after the last round every vertex is pushed onto the unit sphere.
//!
//! By default midpoints are not shared between neighbouring triangles, so a
//! mesh with `n` subdivisions has `12 + 20 * (4^n - 1)` vertices. Enabling
//! [`IcosphereBuilder::with_deduplication`] shares them per edge instead,
//! giving `10 * 4^n + 2` vertices. Both modes produce `20 * 4^n` triangles with
//! identical face order and winding.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::Vec3;

use super::mesh::{Face, Mesh};
use crate::error::{MeshError, MeshResult};
use crate::shader::types::{FrontFace, IndexFormat, VertexInput};

/// Subdivision depth beyond which vertex counts grow impractically large.
pub const PRACTICAL_MAX_SUBDIVISIONS: u32 = 6;

/// Triangles of the base icosahedron, indexing [`icosahedron_vertices`].
///
/// Every face winds clockwise when viewed from outside.
pub const ICOSAHEDRON_FACES: [Face; 20] = [
    [0, 5, 11],
    [0, 1, 5],
    [0, 7, 1],
    [0, 10, 7],
    [0, 11, 10],
    [1, 9, 5],
    [5, 4, 11],
    [11, 2, 10],
    [10, 6, 7],
    [7, 8, 1],
    [3, 4, 9],
    [3, 2, 4],
    [3, 6, 2],
    [3, 8, 6],
    [3, 9, 8],
    [4, 5, 9],
    [2, 11, 4],
    [6, 10, 2],
    [8, 7, 6],
    [9, 1, 8],
];

/// Corners of a regular icosahedron: the cyclic permutations of `(±1, ±t, 0)`
/// where `t` is the golden ratio. Not normalized.
pub fn icosahedron_vertices() -> Vec<Vec3> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Number of triangles after `subdivisions` rounds, if it fits in a `u64`.
pub fn face_count_for(subdivisions: u32) -> Option<u64> {
    4u64.checked_pow(subdivisions)?.checked_mul(20)
}

/// Number of vertices after `subdivisions` rounds, if it fits in a `u64`.
pub fn vertex_count_for(subdivisions: u32, deduplicate: bool) -> Option<u64> {
    let growth = 4u64.checked_pow(subdivisions)?;
    if deduplicate {
        growth.checked_mul(10)?.checked_add(2)
    } else {
        (growth - 1).checked_mul(20)?.checked_add(12)
    }
}

/// Convert an untrusted signed subdivision count.
pub fn checked_subdivisions(count: i64) -> MeshResult<u32> {
    u32::try_from(count).map_err(|_| MeshError::InvalidSubdivisionCount(count))
}

/// Generate a unit icosphere with `subdivisions` rounds and 32-bit indices.
pub fn create_icosphere(subdivisions: u32) -> MeshResult<Mesh> {
    IcosphereBuilder::new().with_subdivisions(subdivisions).build()
}

/// Split every face in `faces` into four, appending one fresh midpoint vertex
/// per edge to `vertices`.
///
/// Existing vertices are never modified; new ones are appended three per face
/// in the order `(p0 + p1) / 2`, `(p1 + p2) / 2`, `(p2 + p0) / 2`. Every face
/// index must address a vertex present on entry. On error `vertices` is left
/// as it was.
pub fn subdivide_once(vertices: &mut Vec<Vec3>, faces: &[Face]) -> MeshResult<Vec<Face>> {
    split_faces(vertices, faces, None)
}

type EdgeMidpoints = HashMap<(u32, u32), u32>;

fn split_faces(
    vertices: &mut Vec<Vec3>,
    faces: &[Face],
    shared: Option<&mut EdgeMidpoints>,
) -> MeshResult<Vec<Face>> {
    let base = vertices.len();
    if let Some(&index) = faces.iter().flatten().find(|&&i| i as usize >= base) {
        return Err(MeshError::IndexOutOfRange {
            index,
            vertex_count: base,
        });
    }

    let split = append_midpoints(vertices, faces, shared);
    if split.is_err() {
        vertices.truncate(base);
    }
    split
}

fn append_midpoints(
    vertices: &mut Vec<Vec3>,
    faces: &[Face],
    mut shared: Option<&mut EdgeMidpoints>,
) -> MeshResult<Vec<Face>> {
    let mut split = Vec::with_capacity(faces.len() * 4);
    for &[p0, p1, p2] in faces {
        let a = midpoint_index(vertices, p0, p1, shared.as_deref_mut())?;
        let b = midpoint_index(vertices, p1, p2, shared.as_deref_mut())?;
        let c = midpoint_index(vertices, p2, p0, shared.as_deref_mut())?;

        split.extend_from_slice(&[[p0, a, c], [p1, b, a], [p2, c, b], [a, b, c]]);
    }
    Ok(split)
}

fn midpoint_index(
    vertices: &mut Vec<Vec3>,
    from: u32,
    to: u32,
    shared: Option<&mut EdgeMidpoints>,
) -> MeshResult<u32> {
    let Some(shared) = shared else {
        return push_midpoint(vertices, from, to);
    };
    match shared.entry((from.min(to), from.max(to))) {
        Entry::Occupied(entry) => Ok(*entry.get()),
        Entry::Vacant(entry) => {
            let index = push_midpoint(vertices, from, to)?;
            entry.insert(index);
            Ok(index)
        }
    }
}

/// `from` and `to` must already be in range.
fn push_midpoint(vertices: &mut Vec<Vec3>, from: u32, to: u32) -> MeshResult<u32> {
    let vertex_count = vertices.len();
    let index = u32::try_from(vertex_count)
        .map_err(|_| MeshError::IndexSpaceExhausted(vertex_count as u64 + 1))?;

    // Plain average: symmetric in its operands, and pulled onto the sphere
    // only by the final normalization.
    let midpoint = (vertices[from as usize] + vertices[to as usize]) * 0.5;
    vertices.push(midpoint);
    Ok(index)
}

/// Configuration for icosphere generation.
///
/// # Example
///
/// ```
/// use icosphere::{IcosphereBuilder, IndexFormat};
///
/// let mesh = IcosphereBuilder::new()
///     .with_subdivisions(2)
///     .with_index_format(IndexFormat::Uint16)
///     .build()
///     .unwrap();
/// assert_eq!(mesh.triangle_count(), 320);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcosphereBuilder {
    subdivisions: u32,
    index_format: IndexFormat,
    deduplicate: bool,
    label: String,
}

impl Default for IcosphereBuilder {
    fn default() -> Self {
        Self {
            subdivisions: 0,
            index_format: IndexFormat::Uint32,
            deduplicate: false,
            label: "icosphere".to_string(),
        }
    }
}

impl IcosphereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of subdivision rounds.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Set the index format the mesh must be addressable with.
    pub fn with_index_format(mut self, format: IndexFormat) -> Self {
        self.index_format = format;
        self
    }

    /// Share edge midpoints between adjacent faces.
    pub fn with_deduplication(mut self, enabled: bool) -> Self {
        self.deduplicate = enabled;
        self
    }

    /// Set the mesh name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    pub fn deduplicate(&self) -> bool {
        self.deduplicate
    }

    /// Vertex count the built mesh will have, if representable.
    pub fn vertex_count(&self) -> Option<u64> {
        vertex_count_for(self.subdivisions, self.deduplicate)
    }

    /// Generate the mesh.
    ///
    /// Fails before allocating anything if the mesh could not be addressed
    /// with the configured index format.
    pub fn build(&self) -> MeshResult<Mesh> {
        let (vertex_count, index_count) = self.check_capacity()?;

        if self.subdivisions > PRACTICAL_MAX_SUBDIVISIONS {
            log::warn!(
                "Generating icosphere '{}' with {} subdivisions ({} vertices)",
                self.label,
                self.subdivisions,
                vertex_count
            );
        }

        let mut positions = icosahedron_vertices();
        positions.reserve(vertex_count - positions.len());
        let mut faces = ICOSAHEDRON_FACES.to_vec();

        let mut shared = self.deduplicate.then(EdgeMidpoints::new);
        for _ in 0..self.subdivisions {
            // Indices in the cache only name edges of the previous round
            if let Some(cache) = shared.as_mut() {
                cache.clear();
            }
            faces = split_faces(&mut positions, &faces, shared.as_mut())?;
        }

        let vertices: Vec<VertexInput> = positions
            .into_iter()
            .map(|position| {
                let on_sphere = position.normalize();
                VertexInput::new(on_sphere, on_sphere)
            })
            .collect();

        let mut indices = Vec::with_capacity(index_count);
        indices.extend(faces.into_iter().flatten());

        log::debug!(
            "Generated icosphere '{}': {} subdivisions, {} vertices, {} triangles",
            self.label,
            self.subdivisions,
            vertices.len(),
            indices.len() / 3
        );

        Ok(Mesh::new(
            self.label.clone(),
            vertices,
            indices,
            self.index_format,
            FrontFace::Cw,
        ))
    }

    fn check_capacity(&self) -> MeshResult<(usize, usize)> {
        let exceeded = |vertex_count| MeshError::CapacityExceeded {
            vertex_count,
            format: self.index_format,
        };

        let vertex_count = self.vertex_count().ok_or(exceeded(u64::MAX))?;
        if vertex_count > self.index_format.max_vertices() {
            return Err(exceeded(vertex_count));
        }

        let index_count = face_count_for(self.subdivisions)
            .and_then(|faces| faces.checked_mul(3))
            .and_then(|count| usize::try_from(count).ok())
            .ok_or(exceeded(vertex_count))?;
        let vertex_count = usize::try_from(vertex_count).map_err(|_| exceeded(vertex_count))?;

        Ok((vertex_count, index_count))
    }
}
