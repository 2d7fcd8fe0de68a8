//! wgpu render backend for meshview.
//!
//! Implements [`FrameBackend`] on top of a single render pass per frame. The
//! scene shader backs two pipelines (line list and triangle list) that share
//! one module and one layout.
//!
//! # Invariants
//! - Frame-global uniforms live in one buffer bound at group 0.
//! - Per-draw uniforms are written to their own slot of a dynamic-offset
//!   buffer, so every draw sees the values set right before it.
//! - Each draw binds its pipeline, bind groups and buffers itself; nothing
//!   carries over from the previous draw.
//!
//! [`FrameBackend`]: meshview_render::FrameBackend

mod context;
mod error;
mod gpu;
mod mesh;
mod shaders;

pub use context::request_device;
pub use error::GpuError;
pub use gpu::{MAX_DRAWS_PER_FRAME, WgpuFrame, WgpuRenderer};
pub use mesh::GpuMesh;
pub use shaders::{SCENE_SHADER, load_shader_source};
