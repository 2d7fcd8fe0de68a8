use crate::Vertex;

/// Primitive topology used when drawing a mesh's index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    LineList,
    TriangleList,
}

/// Whether vertex data is uploaded once or refreshed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageHint {
    Static,
    Dynamic,
}

/// Errors from mesh validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// CPU-side geometry: an ordered vertex list plus u32 indices into it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
    pub usage: UsageHint,
}

impl MeshData {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Check that every index refers to an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertex_count)
        {
            Some((position, &index)) => Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn line(indices: Vec<u32>) -> MeshData {
        MeshData {
            vertices: vec![
                Vertex::new(Vec3::ZERO, Vec4::ONE),
                Vertex::new(Vec3::X, Vec4::ONE),
            ],
            indices,
            topology: Topology::LineList,
            usage: UsageHint::Static,
        }
    }

    #[test]
    fn valid_indices_pass() {
        let mesh = line(vec![0, 1]);
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.index_count(), 2);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mesh = line(vec![0, 1, 1, 2]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                position: 3,
                index: 2,
                vertex_count: 2,
            })
        );
    }
}
