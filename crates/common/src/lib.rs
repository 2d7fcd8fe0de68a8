//! Shared value types for meshview.
//!
//! # Invariants
//! - `Vertex` is a plain `#[repr(C)]` record that can be cast to bytes for upload.
//! - Every index in a `MeshData` refers to an existing vertex.

mod mesh;
mod types;

pub use mesh::{MeshData, MeshError, Topology, UsageHint};
pub use types::{Transform, Vertex};
