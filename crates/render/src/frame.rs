use crate::{FrameBackend, FrameMatrices, RenderError, ScenePass};
use meshview_input::PointerState;
use meshview_kernel::Scene;

/// Per-frame inputs sampled by the frame loop driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerState,
    /// Framebuffer width over height.
    pub aspect_ratio: f32,
    /// Seconds since the frame clock was reset.
    pub elapsed: f32,
}

impl FrameInput {
    pub fn new(pointer: PointerState, aspect_ratio: f32, elapsed: f32) -> Self {
        Self {
            pointer,
            aspect_ratio,
            elapsed,
        }
    }
}

/// Run render steps 1 to 8 against `backend`.
///
/// Matrices are taken before the pointer is applied, so a camera drag shows
/// up one frame later. Returns the matrices the frame was drawn with, for the
/// overlay.
pub fn run_frame<B: FrameBackend>(
    scene: &mut Scene,
    input: &FrameInput,
    backend: &mut B,
) -> Result<FrameMatrices, RenderError> {
    let matrices = FrameMatrices::compute(scene, input.aspect_ratio);

    scene.camera.apply_pointer(&input.pointer);

    ScenePass::new(matrices, input.elapsed).execute(scene, backend)?;

    scene.camera.ease_step();

    tracing::trace!(
        elapsed = input.elapsed,
        camera_x = scene.camera.position.x,
        "frame rendered"
    );
    Ok(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendCall, RecordingBackend};
    use glam::{Mat4, Vec3};
    use meshview_common::Topology;
    use meshview_kernel::{Camera, ObjectKind, StartupEase};

    #[test]
    fn first_frame_with_default_scene() {
        let mut scene = Scene::new();
        let mut backend = RecordingBackend::for_scene(&scene);
        let aspect = 1200.0 / 720.0;
        let input = FrameInput::new(PointerState::default(), aspect, 0.0);

        run_frame(&mut scene, &input, &mut backend).unwrap();

        let expected = Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 5000.0)
            * Mat4::look_at_rh(Vec3::new(1000.0, 500.0, 500.0), Vec3::ZERO, Vec3::Y)
            * Mat4::IDENTITY;
        let draws: Vec<_> = backend.draws().copied().collect();
        let pyramid_mvp = Mat4::from_cols_array_2d(&draws[0].uniforms.mvp);
        assert!(pyramid_mvp.abs_diff_eq(expected, 1e-5));

        assert_eq!(draws[1].object, ObjectKind::Grid);
        assert_eq!(draws[1].topology, Topology::LineList);
        assert_eq!(draws[1].index_count, 164);
        assert_eq!(scene.grid.mesh.vertex_count(), 164);
    }

    #[test]
    fn easing_runs_after_drawing() {
        let mut scene = Scene::new();
        let mut backend = RecordingBackend::for_scene(&scene);
        let input = FrameInput::new(PointerState::default(), 1.0, 0.0);

        let matrices = run_frame(&mut scene, &input, &mut backend).unwrap();

        assert_eq!(matrices.view, Camera::default().view_matrix());
        assert_eq!(scene.camera.position.x, 1000.0 + (500.0 - 1000.0) * 0.08);
    }

    #[test]
    fn drag_is_visible_one_frame_later() {
        let camera = Camera::default().with_ease(StartupEase::finished());
        let mut scene = Scene::with_camera(camera);
        let mut backend = RecordingBackend::for_scene(&scene);

        let press = FrameInput::new(PointerState::new(10.0, 10.0, true), 1.0, 0.0);
        let held = FrameInput::new(PointerState::new(20.0, 10.0, true), 1.0, 0.1);
        let still = FrameInput::new(PointerState::new(20.0, 10.0, true), 1.0, 0.2);

        run_frame(&mut scene, &press, &mut backend).unwrap();
        let before = run_frame(&mut scene, &held, &mut backend).unwrap();
        assert_eq!(before.view, Camera::default().view_matrix());
        assert_eq!(scene.camera.position.x, 950.0);

        let after = run_frame(&mut scene, &still, &mut backend).unwrap();
        assert_eq!(after.view, scene.camera.view_matrix());
        assert_ne!(after.view, before.view);
    }

    #[test]
    fn backend_errors_abort_the_frame() {
        let mut scene = Scene::new();
        let mut backend = RecordingBackend::for_scene(&Scene::new());
        scene.pyramid.mesh.vertices.pop();
        let input = FrameInput::new(PointerState::default(), 1.0, 0.0);

        let err = run_frame(&mut scene, &input, &mut backend).unwrap_err();
        assert!(matches!(err, RenderError::VertexCountChanged { .. }));
        assert!(!backend.calls().iter().any(|c| matches!(c, BackendCall::Draw(_))));
        assert!(scene.camera.is_easing());
        assert_eq!(scene.camera.position.x, 1000.0);
    }
}
