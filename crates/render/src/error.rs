use crate::uniform::UniformKind;
use meshview_common::Topology;
use meshview_kernel::ObjectKind;

/// Errors raised while driving a frame through a backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("uniform {name} expects a {expected:?} value, got {actual:?}")]
    UniformType {
        name: &'static str,
        expected: UniformKind,
        actual: UniformKind,
    },
    #[error("shader source does not declare uniform {0}")]
    MissingUniform(&'static str),
    #[error("{0:?} mesh is static and cannot be re-uploaded")]
    StaticReupload(ObjectKind),
    #[error("{object:?} re-upload has {actual} vertices, buffer holds {expected}")]
    VertexCountChanged {
        object: ObjectKind,
        expected: u32,
        actual: u32,
    },
    #[error("{object:?} draw requested {requested} indices, mesh holds {available}")]
    IndexCountMismatch {
        object: ObjectKind,
        requested: u32,
        available: u32,
    },
    #[error("{object:?} draw requested {requested:?}, mesh was built for {expected:?}")]
    TopologyMismatch {
        object: ObjectKind,
        requested: Topology,
        expected: Topology,
    },
    #[error("no mesh uploaded for {0:?}")]
    UnknownMesh(ObjectKind),
    #[error("draw issued before the frame was cleared")]
    PassNotStarted,
    #[error("draw issued before the shader program was bound")]
    ProgramNotBound,
    #[error("per-frame draw budget of {0} exhausted")]
    DrawBudgetExceeded(u32),
}
