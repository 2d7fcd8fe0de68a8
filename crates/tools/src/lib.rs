//! Developer tooling: debug overlay text and a read-only scene inspector.
//!
//! # Invariants
//! - Tools only read scene state.

mod inspector;
mod overlay;

pub use inspector::{ObjectSummary, SceneInspector, SceneSummary};
pub use overlay::{MatrixReadout, matrix_rows, model_matrix_readouts};
