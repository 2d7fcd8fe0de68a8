use crate::{FrameBackend, FrameMatrices, RenderError, Uniform, UniformValue};
use meshview_common::UsageHint;
use meshview_kernel::Scene;

/// Clear, upload, bind and draw for one frame (render steps 3 to 7).
///
/// Matrices are supplied by the caller because they are computed before the
/// frame's input is applied.
#[derive(Debug, Clone, Copy)]
pub struct ScenePass {
    pub matrices: FrameMatrices,
    /// Seconds since the frame clock was reset.
    pub elapsed: f32,
}

impl ScenePass {
    pub fn new(matrices: FrameMatrices, elapsed: f32) -> Self {
        Self { matrices, elapsed }
    }

    pub fn execute<B: FrameBackend>(&self, scene: &Scene, backend: &mut B) -> Result<(), RenderError> {
        backend.clear()?;

        for object in scene.objects() {
            if object.mesh.usage == UsageHint::Dynamic {
                backend.reupload(object.kind, &object.mesh.vertices)?;
            }
        }

        backend.use_program()?;

        let anim = &scene.animation;
        backend.set_uniform(Uniform::Time, UniformValue::Float(self.elapsed))?;
        backend.set_uniform(Uniform::AnimSpeed, UniformValue::Float(anim.speed))?;
        backend.set_uniform(Uniform::RotateAnimX, UniformValue::Bool(anim.rotate_x))?;
        backend.set_uniform(Uniform::RotateAnimY, UniformValue::Bool(anim.rotate_y))?;
        backend.set_uniform(Uniform::RotateAnimZ, UniformValue::Bool(anim.rotate_z))?;

        for object in scene.objects() {
            let flag = Uniform::animate_flag(object.kind);
            backend.set_uniform(Uniform::ObjectId, UniformValue::Int(object.kind.id()))?;
            backend.set_uniform(flag, UniformValue::Bool(object.animate))?;
            backend.set_uniform(
                Uniform::Mvp,
                UniformValue::Mat4(self.matrices.mvp(object.kind)),
            )?;
            backend.draw(object.kind, object.mesh.topology, object.mesh.index_count())?;
            backend.set_uniform(flag, UniformValue::Bool(false))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendCall, RecordingBackend};
    use meshview_kernel::ObjectKind;

    fn run(scene: &Scene) -> RecordingBackend {
        let mut backend = RecordingBackend::for_scene(scene);
        let pass = ScenePass::new(FrameMatrices::compute(scene, 1.5), 2.0);
        pass.execute(scene, &mut backend).unwrap();
        backend
    }

    #[test]
    fn call_order_follows_protocol() {
        let scene = Scene::new();
        let backend = run(&scene);
        let calls = backend.calls();

        assert_eq!(calls[0], BackendCall::Clear);
        assert_eq!(
            calls[1],
            BackendCall::Reupload {
                object: ObjectKind::Pyramid,
                positions: scene
                    .pyramid
                    .mesh
                    .vertices
                    .iter()
                    .map(|v| v.position)
                    .collect(),
            }
        );
        assert_eq!(calls[2], BackendCall::UseProgram);

        let frame_uniforms: Vec<Uniform> = calls[3..8]
            .iter()
            .map(|c| match c {
                BackendCall::SetUniform(u, _) => *u,
                other => panic!("expected uniform, got {other}"),
            })
            .collect();
        assert_eq!(
            frame_uniforms,
            vec![
                Uniform::Time,
                Uniform::AnimSpeed,
                Uniform::RotateAnimX,
                Uniform::RotateAnimY,
                Uniform::RotateAnimZ,
            ]
        );

        let draws: Vec<ObjectKind> = backend.draws().map(|d| d.object).collect();
        assert_eq!(draws, vec![ObjectKind::Pyramid, ObjectKind::Grid]);
    }

    #[test]
    fn grid_is_never_reuploaded() {
        let backend = run(&Scene::new());
        let reuploads = backend
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Reupload { .. }))
            .count();
        assert_eq!(reuploads, 1);
    }

    #[test]
    fn edited_pyramid_vertices_are_reuploaded() {
        let mut scene = Scene::new();
        scene.pyramid.mesh.vertices[0].position = [0.0, 999.0, 0.0];
        let backend = run(&scene);

        let uploaded = backend.calls().iter().find_map(|c| match c {
            BackendCall::Reupload { object, positions } => Some((*object, positions.clone())),
            _ => None,
        });
        let (object, positions) = uploaded.expect("pyramid reupload recorded");
        assert_eq!(object, ObjectKind::Pyramid);
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], [0.0, 999.0, 0.0]);
        assert_eq!(positions[1], scene.pyramid.mesh.vertices[1].position);
    }

    #[test]
    fn animate_flag_does_not_leak_to_next_draw() {
        let mut scene = Scene::new();
        scene.pyramid.animate = true;
        let backend = run(&scene);
        let draws: Vec<_> = backend.draws().collect();

        assert_eq!(draws[0].uniforms.py_anim, 1);
        assert_eq!(draws[0].uniforms.object_id, 0);
        assert_eq!(draws[1].uniforms.py_anim, 0);
        assert_eq!(draws[1].uniforms.grid_anim, 0);
        assert_eq!(draws[1].uniforms.object_id, 1);
        assert!(matches!(
            backend.calls().last(),
            Some(BackendCall::SetUniform(Uniform::GridAnim, UniformValue::Bool(false)))
        ));
    }

    #[test]
    fn frame_uniforms_reach_every_draw() {
        let mut scene = Scene::new();
        scene.animation.rotate_z = true;
        scene.animation.speed = 7.0;
        let backend = run(&scene);
        for draw in backend.draws() {
            assert_eq!(draw.frame.time, 2.0);
            assert_eq!(draw.frame.anim_speed, 7.0);
            assert_eq!(draw.frame.rotate_z, 1);
            assert_eq!(draw.frame.rotate_x, 0);
        }
    }
}
