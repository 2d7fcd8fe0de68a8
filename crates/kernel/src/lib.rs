//! Scene kernel: the state the render loop reads and the control panel edits.
//!
//! # Invariants
//! - Grid topology never changes after construction; only pyramid vertex
//!   positions are edited at runtime.
//! - Object animation is a shader-side effect; nothing here advances
//!   transforms over time.
//! - The startup camera easing runs once and can never be re-armed.

pub mod camera;
pub mod clock;
pub mod geometry;
pub mod scene;

pub use camera::{Camera, StartupEase};
pub use clock::FrameClock;
pub use scene::{AnimationFlags, ObjectKind, Scene, SceneObject};
