//! Error types for mesh generation

use crate::shader::types::IndexFormat;
use thiserror::Error;

/// Mesh generation error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Invalid subdivision count: {0} (expected 0..={max})", max = u32::MAX)]
    InvalidSubdivisionCount(i64),
    #[error("Capacity exceeded: {vertex_count} vertices cannot be addressed with {format:?} indices")]
    CapacityExceeded { vertex_count: u64, format: IndexFormat },
    #[error("Vertex count {0} exceeds the 32-bit index space")]
    IndexSpaceExhausted(u64),
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

pub type MeshResult<T> = Result<T, MeshError>;
