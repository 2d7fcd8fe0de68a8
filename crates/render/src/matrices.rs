use glam::Mat4;
use meshview_kernel::{ObjectKind, Scene};

/// Matrices for one frame, computed before input is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub pyramid_model: Mat4,
    pub grid_model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameMatrices {
    pub fn compute(scene: &Scene, aspect_ratio: f32) -> Self {
        Self {
            pyramid_model: scene.pyramid.transform.model_matrix(),
            grid_model: scene.grid.transform.model_matrix(),
            view: scene.camera.view_matrix(),
            projection: scene.camera.projection_matrix(aspect_ratio),
        }
    }

    pub fn model(&self, object: ObjectKind) -> Mat4 {
        match object {
            ObjectKind::Pyramid => self.pyramid_model,
            ObjectKind::Grid => self.grid_model,
        }
    }

    /// `projection * view * model`.
    pub fn mvp(&self, object: ObjectKind) -> Mat4 {
        self.projection * self.view * self.model(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn default_scene_mvp() {
        let scene = Scene::new();
        let aspect = 1200.0 / 720.0;
        let m = FrameMatrices::compute(&scene, aspect);

        let expected = Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 5000.0)
            * Mat4::look_at_rh(Vec3::new(1000.0, 500.0, 500.0), Vec3::ZERO, Vec3::Y);
        assert!(m.mvp(ObjectKind::Pyramid).abs_diff_eq(expected, 1e-5));
        assert!(m.mvp(ObjectKind::Grid).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn models_are_per_object() {
        let mut scene = Scene::new();
        scene.grid.transform.translate = Vec3::new(0.0, -10.0, 0.0);
        let m = FrameMatrices::compute(&scene, 1.0);
        assert!(m.pyramid_model.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert_eq!(m.model(ObjectKind::Grid), Mat4::from_translation(Vec3::new(0.0, -10.0, 0.0)));
    }
}
