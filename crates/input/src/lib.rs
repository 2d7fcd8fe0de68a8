//! Desktop pointer input.
//!
//! Windowing events are folded into a [`PointerState`] that is sampled once per
//! frame; the [`DragTracker`] turns consecutive samples into drag deltas.
//!
//! # Invariants
//! - The first sample of a drag only anchors it; it never yields a delta.
//! - Releasing the trigger button discards the anchor.

pub mod drag;
pub mod pointer;

pub use drag::{DragState, DragTracker};
pub use pointer::PointerState;
