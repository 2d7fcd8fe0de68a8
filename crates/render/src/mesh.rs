use crate::RenderError;
use meshview_common::{Topology, UsageHint, Vertex};
use meshview_kernel::{ObjectKind, SceneObject};

/// Buffer bookkeeping for one uploaded mesh, shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInfo {
    pub object: ObjectKind,
    pub topology: Topology,
    pub usage: UsageHint,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshInfo {
    pub fn of(object: &SceneObject) -> Self {
        Self {
            object: object.kind,
            topology: object.mesh.topology,
            usage: object.mesh.usage,
            vertex_count: object.mesh.vertex_count(),
            index_count: object.mesh.index_count(),
        }
    }

    /// A re-upload must target a dynamic mesh and refill the same number of vertices.
    pub fn check_reupload(&self, vertices: &[Vertex]) -> Result<(), RenderError> {
        if self.usage != UsageHint::Dynamic {
            return Err(RenderError::StaticReupload(self.object));
        }
        let actual = vertices.len() as u32;
        if actual != self.vertex_count {
            return Err(RenderError::VertexCountChanged {
                object: self.object,
                expected: self.vertex_count,
                actual,
            });
        }
        Ok(())
    }

    /// A draw must use the mesh's own topology and its full index list.
    pub fn check_draw(&self, topology: Topology, index_count: u32) -> Result<(), RenderError> {
        if topology != self.topology {
            return Err(RenderError::TopologyMismatch {
                object: self.object,
                requested: topology,
                expected: self.topology,
            });
        }
        if index_count != self.index_count {
            return Err(RenderError::IndexCountMismatch {
                object: self.object,
                requested: index_count,
                available: self.index_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_kernel::Scene;

    #[test]
    fn static_mesh_rejects_reupload() {
        let scene = Scene::new();
        let grid = MeshInfo::of(&scene.grid);
        assert_eq!(
            grid.check_reupload(&scene.grid.mesh.vertices),
            Err(RenderError::StaticReupload(ObjectKind::Grid))
        );
    }

    #[test]
    fn dynamic_mesh_accepts_same_length() {
        let scene = Scene::new();
        let pyramid = MeshInfo::of(&scene.pyramid);
        for _ in 0..3 {
            assert_eq!(pyramid.check_reupload(&scene.pyramid.mesh.vertices), Ok(()));
        }
        let shorter = &scene.pyramid.mesh.vertices[..4];
        assert_eq!(
            pyramid.check_reupload(shorter),
            Err(RenderError::VertexCountChanged {
                object: ObjectKind::Pyramid,
                expected: 5,
                actual: 4,
            })
        );
    }

    #[test]
    fn draw_checks_topology_and_count() {
        let scene = Scene::new();
        let grid = MeshInfo::of(&scene.grid);
        assert!(grid.check_draw(Topology::LineList, 164).is_ok());
        assert!(matches!(
            grid.check_draw(Topology::TriangleList, 164),
            Err(RenderError::TopologyMismatch { .. })
        ));
        assert!(matches!(
            grid.check_draw(Topology::LineList, 18),
            Err(RenderError::IndexCountMismatch { .. })
        ));
    }
}
