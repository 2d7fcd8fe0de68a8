use meshview_common::{Topology, UsageHint};
use meshview_kernel::{ObjectKind, Scene};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for the CLI and debug output.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let camera = &scene.camera;
        SceneSummary {
            objects: scene
                .objects()
                .map(|o| ObjectSummary {
                    kind: o.kind,
                    topology: o.mesh.topology,
                    usage: o.mesh.usage,
                    vertex_count: o.mesh.vertex_count(),
                    index_count: o.mesh.index_count(),
                    animate: o.animate,
                })
                .collect(),
            camera_position: camera.position.to_array(),
            camera_target: camera.target.to_array(),
            fov: camera.fov,
            z_near: camera.z_near,
            z_far: camera.z_far,
            easing: camera.is_easing(),
        }
    }
}

/// Mesh and animation state of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    pub kind: ObjectKind,
    pub topology: Topology,
    pub usage: UsageHint,
    pub vertex_count: u32,
    pub index_count: u32,
    pub animate: bool,
}

impl std::fmt::Display for ObjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:?} {:?} vertices={} indices={} animate={}",
            self.kind.label(),
            self.topology,
            self.usage,
            self.vertex_count,
            self.index_count,
            self.animate
        )
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub objects: Vec<ObjectSummary>,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub easing: bool,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for object in &self.objects {
            writeln!(f, "{object}")?;
        }
        let [px, py, pz] = self.camera_position;
        let [tx, ty, tz] = self.camera_target;
        write!(
            f,
            "Camera: pos=({px:.1}, {py:.1}, {pz:.1}) target=({tx:.1}, {ty:.1}, {tz:.1}) fov={:.0} near={} far={} easing={}",
            self.fov, self.z_near, self.z_far, self.easing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_default_scene() {
        let summary = SceneInspector::summary(&Scene::new());
        assert_eq!(summary.objects.len(), 2);
        assert_eq!(summary.objects[0].kind, ObjectKind::Pyramid);
        assert_eq!(summary.objects[0].vertex_count, 5);
        assert_eq!(summary.objects[0].index_count, 18);
        assert_eq!(summary.objects[1].vertex_count, 164);
        assert_eq!(summary.objects[1].index_count, 164);
        assert_eq!(summary.camera_position, [1000.0, 500.0, 500.0]);
        assert!(summary.easing);
    }

    #[test]
    fn summary_display() {
        let mut scene = Scene::new();
        scene.grid.animate = true;
        let s = SceneInspector::summary(&scene).to_string();
        assert!(s.contains("Pyramid: TriangleList Dynamic vertices=5 indices=18 animate=false"));
        assert!(s.contains("Grid: LineList Static vertices=164 indices=164 animate=true"));
        assert!(s.contains("pos=(1000.0, 500.0, 500.0)"));
        assert!(s.contains("fov=45"));
    }
}
