use std::fmt;

use crate::{
    FrameBackend, FrameUniforms, MeshInfo, ObjectUniforms, RenderError, Uniform, UniformTable,
    UniformValue,
};
use meshview_common::{Topology, Vertex};
use meshview_kernel::{ObjectKind, Scene};

/// What a draw saw: its mesh parameters plus the uniform state at the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub object: ObjectKind,
    pub topology: Topology,
    pub index_count: u32,
    pub uniforms: ObjectUniforms,
    pub frame: FrameUniforms,
}

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Clear,
    /// Positions as uploaded, in vertex order.
    Reupload {
        object: ObjectKind,
        positions: Vec<[f32; 3]>,
    },
    UseProgram,
    SetUniform(Uniform, UniformValue),
    Draw(DrawRecord),
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendCall::Clear => write!(f, "clear"),
            BackendCall::Reupload { object, positions } => write!(
                f,
                "reupload {} ({} vertices)",
                object.label(),
                positions.len()
            ),
            BackendCall::UseProgram => write!(f, "use program"),
            BackendCall::SetUniform(u, value) => match value {
                UniformValue::Float(v) => write!(f, "set {} = {v:.3}", u.name()),
                UniformValue::Int(v) => write!(f, "set {} = {v}", u.name()),
                UniformValue::Bool(v) => write!(f, "set {} = {v}", u.name()),
                UniformValue::Mat4(_) => write!(f, "set {} = <mat4>", u.name()),
            },
            BackendCall::Draw(d) => write!(
                f,
                "draw {} {:?} ({} indices)",
                d.object.label(),
                d.topology,
                d.index_count
            ),
        }
    }
}

/// Device-free backend that validates and logs every call.
///
/// Applies the same checks as the GPU backend, so a frame that records
/// cleanly here would also submit cleanly.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    meshes: Vec<MeshInfo>,
    uniforms: UniformTable,
    cleared: bool,
    program_bound: bool,
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    /// Register a mesh for every object in the scene, as if uploaded at startup.
    pub fn for_scene(scene: &Scene) -> Self {
        Self {
            meshes: scene.objects().map(MeshInfo::of).collect(),
            uniforms: UniformTable::new(),
            cleared: false,
            program_bound: false,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawRecord> {
        self.calls.iter().filter_map(|call| match call {
            BackendCall::Draw(d) => Some(d),
            _ => None,
        })
    }

    /// Drain the log and end the frame. Uniform values persist, as they do
    /// in a linked program.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        self.cleared = false;
        self.program_bound = false;
        std::mem::take(&mut self.calls)
    }

    fn mesh(&self, object: ObjectKind) -> Option<&MeshInfo> {
        self.meshes.iter().find(|m| m.object == object)
    }
}

impl FrameBackend for RecordingBackend {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.cleared = true;
        self.calls.push(BackendCall::Clear);
        Ok(())
    }

    fn reupload(&mut self, object: ObjectKind, vertices: &[Vertex]) -> Result<(), RenderError> {
        let mesh = self
            .mesh(object)
            .ok_or(RenderError::UnknownMesh(object))?;
        mesh.check_reupload(vertices)?;
        self.calls.push(BackendCall::Reupload {
            object,
            positions: vertices.iter().map(|v| v.position).collect(),
        });
        Ok(())
    }

    fn use_program(&mut self) -> Result<(), RenderError> {
        self.program_bound = true;
        self.calls.push(BackendCall::UseProgram);
        Ok(())
    }

    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) -> Result<(), RenderError> {
        if !self.program_bound {
            return Err(RenderError::ProgramNotBound);
        }
        self.uniforms.set(uniform, value)?;
        self.calls.push(BackendCall::SetUniform(uniform, value));
        Ok(())
    }

    fn draw(
        &mut self,
        object: ObjectKind,
        topology: Topology,
        index_count: u32,
    ) -> Result<(), RenderError> {
        if !self.cleared {
            return Err(RenderError::PassNotStarted);
        }
        if !self.program_bound {
            return Err(RenderError::ProgramNotBound);
        }
        let mesh = self
            .mesh(object)
            .ok_or(RenderError::UnknownMesh(object))?;
        mesh.check_draw(topology, index_count)?;
        self.calls.push(BackendCall::Draw(DrawRecord {
            object,
            topology,
            index_count,
            uniforms: self.uniforms.object(),
            frame: self.uniforms.frame(),
        }));
        Ok(())
    }
}
