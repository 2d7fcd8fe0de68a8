use crate::RenderError;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use meshview_kernel::ObjectKind;

/// Every uniform the scene shader must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Mvp,
    Time,
    ObjectId,
    PyAnim,
    GridAnim,
    AnimSpeed,
    RotateAnimX,
    RotateAnimY,
    RotateAnimZ,
}

/// Whether a uniform is set once per frame or before each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformScope {
    Frame,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Int,
    Bool,
    Mat4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Mat4(Mat4),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }
}

impl Uniform {
    pub const ALL: [Uniform; 9] = [
        Uniform::Mvp,
        Uniform::Time,
        Uniform::ObjectId,
        Uniform::PyAnim,
        Uniform::GridAnim,
        Uniform::AnimSpeed,
        Uniform::RotateAnimX,
        Uniform::RotateAnimY,
        Uniform::RotateAnimZ,
    ];

    /// Name as declared in the shader.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Mvp => "uMVP",
            Uniform::Time => "uTime",
            Uniform::ObjectId => "uObjectID",
            Uniform::PyAnim => "uPyAnim",
            Uniform::GridAnim => "uGridAnim",
            Uniform::AnimSpeed => "uAnimSpeed",
            Uniform::RotateAnimX => "uRotateAnimX",
            Uniform::RotateAnimY => "uRotateAnimY",
            Uniform::RotateAnimZ => "uRotateAnimZ",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }

    pub fn scope(self) -> UniformScope {
        match self {
            Uniform::Mvp | Uniform::ObjectId | Uniform::PyAnim | Uniform::GridAnim => {
                UniformScope::Object
            }
            Uniform::Time
            | Uniform::AnimSpeed
            | Uniform::RotateAnimX
            | Uniform::RotateAnimY
            | Uniform::RotateAnimZ => UniformScope::Frame,
        }
    }

    pub fn kind(self) -> UniformKind {
        match self {
            Uniform::Mvp => UniformKind::Mat4,
            Uniform::Time | Uniform::AnimSpeed => UniformKind::Float,
            Uniform::ObjectId => UniformKind::Int,
            Uniform::PyAnim
            | Uniform::GridAnim
            | Uniform::RotateAnimX
            | Uniform::RotateAnimY
            | Uniform::RotateAnimZ => UniformKind::Bool,
        }
    }

    /// The animate-flag uniform gating the given object.
    pub fn animate_flag(object: ObjectKind) -> Self {
        match object {
            ObjectKind::Pyramid => Uniform::PyAnim,
            ObjectKind::Grid => Uniform::GridAnim,
        }
    }
}

/// Frame-global uniform block. Layout matches `FrameUniforms` in the WGSL shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub time: f32,
    pub anim_speed: f32,
    pub rotate_x: u32,
    pub rotate_y: u32,
    pub rotate_z: u32,
    pub _pad: [u32; 3],
}

/// Per-draw uniform block. Layout matches `ObjectUniforms` in the WGSL shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub mvp: [[f32; 4]; 4],
    pub object_id: i32,
    pub py_anim: u32,
    pub grid_anim: u32,
    pub _pad: u32,
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
            ..Self::zeroed()
        }
    }
}

/// CPU mirror of the shader's uniform state, addressed by [`Uniform`].
///
/// Values persist until overwritten, matching how program uniforms behave.
/// Backends read [`frame`](Self::frame) once per frame and snapshot
/// [`object`](Self::object) at each draw.
#[derive(Debug, Clone, Default)]
pub struct UniformTable {
    frame: FrameUniforms,
    object: ObjectUniforms,
    frame_dirty: bool,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            anim_speed: 1.0,
            ..Self::zeroed()
        }
    }
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check once, when the program is built, that every uniform name is
    /// declared in the shader source.
    pub fn verify_source(source: &str) -> Result<(), RenderError> {
        match Uniform::ALL
            .into_iter()
            .find(|u| !declares_identifier(source, u.name()))
        {
            Some(missing) => Err(RenderError::MissingUniform(missing.name())),
            None => Ok(()),
        }
    }

    pub fn set(&mut self, uniform: Uniform, value: UniformValue) -> Result<(), RenderError> {
        match (uniform, value) {
            (Uniform::Mvp, UniformValue::Mat4(m)) => self.object.mvp = m.to_cols_array_2d(),
            (Uniform::ObjectId, UniformValue::Int(id)) => self.object.object_id = id,
            (Uniform::PyAnim, UniformValue::Bool(b)) => self.object.py_anim = b as u32,
            (Uniform::GridAnim, UniformValue::Bool(b)) => self.object.grid_anim = b as u32,
            (Uniform::Time, UniformValue::Float(t)) => self.frame.time = t,
            (Uniform::AnimSpeed, UniformValue::Float(s)) => self.frame.anim_speed = s,
            (Uniform::RotateAnimX, UniformValue::Bool(b)) => self.frame.rotate_x = b as u32,
            (Uniform::RotateAnimY, UniformValue::Bool(b)) => self.frame.rotate_y = b as u32,
            (Uniform::RotateAnimZ, UniformValue::Bool(b)) => self.frame.rotate_z = b as u32,
            _ => {
                return Err(RenderError::UniformType {
                    name: uniform.name(),
                    expected: uniform.kind(),
                    actual: value.kind(),
                });
            }
        }
        if uniform.scope() == UniformScope::Frame {
            self.frame_dirty = true;
        }
        Ok(())
    }

    pub fn frame(&self) -> FrameUniforms {
        self.frame
    }

    pub fn object(&self) -> ObjectUniforms {
        self.object
    }

    /// True once after any frame-global uniform changed.
    pub fn take_frame_dirty(&mut self) -> bool {
        std::mem::take(&mut self.frame_dirty)
    }
}

fn declares_identifier(source: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    source.match_indices(name).any(|(at, _)| {
        let before = source[..at].chars().next_back();
        let after = source[at + name.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}
