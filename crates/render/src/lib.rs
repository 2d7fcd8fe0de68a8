//! Rendering protocol: what gets bound, uploaded and drawn each frame, and in
//! which order, independent of the graphics API.
//!
//! # Invariants
//! - Frame-global uniforms are uploaded once per frame, before any draw.
//! - Objects are drawn in [`ObjectKind::DRAW_ORDER`]; each object's animate
//!   flag is cleared right after its draw so it cannot reach the next one.
//! - Static meshes are never re-uploaded; dynamic meshes are re-uploaded every
//!   frame with an unchanged vertex count.
//!
//! The GPU backend lives in `meshview-render-wgpu`; [`RecordingBackend`]
//! implements the same trait without a device.
//!
//! [`ObjectKind::DRAW_ORDER`]: meshview_kernel::ObjectKind::DRAW_ORDER

mod error;
mod frame;
mod matrices;
mod mesh;
mod pass;
mod recording;
mod renderer;
mod uniform;

pub use error::RenderError;
pub use frame::{FrameInput, run_frame};
pub use matrices::FrameMatrices;
pub use mesh::MeshInfo;
pub use pass::ScenePass;
pub use recording::{BackendCall, DrawRecord, RecordingBackend};
pub use renderer::FrameBackend;
pub use uniform::{
    FrameUniforms, ObjectUniforms, Uniform, UniformKind, UniformScope, UniformTable, UniformValue,
};
