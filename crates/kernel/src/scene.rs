use crate::camera::Camera;
use crate::geometry::{GRID_HALF_EXTENT, GRID_SPACING, grid_mesh, pyramid_mesh};
use meshview_common::{MeshData, Transform};

/// The two drawable objects. Discriminants are the shader's object ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Pyramid = 0,
    Grid = 1,
}

impl ObjectKind {
    /// Fixed per-frame draw order.
    pub const DRAW_ORDER: [ObjectKind; 2] = [ObjectKind::Pyramid, ObjectKind::Grid];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Pyramid => "Pyramid",
            ObjectKind::Grid => "Grid",
        }
    }
}

/// One drawable: its geometry, its transform and its animate toggle.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub mesh: MeshData,
    pub transform: Transform,
    /// Shader-side animation toggle for this object.
    pub animate: bool,
}

impl SceneObject {
    pub fn new(kind: ObjectKind, mesh: MeshData) -> Self {
        Self {
            kind,
            mesh,
            transform: Transform::default(),
            animate: false,
        }
    }
}

/// Animation controls shared by both objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFlags {
    pub rotate_x: bool,
    pub rotate_y: bool,
    pub rotate_z: bool,
    pub speed: f32,
}

impl Default for AnimationFlags {
    fn default() -> Self {
        Self {
            rotate_x: false,
            rotate_y: false,
            rotate_z: false,
            speed: 1.0,
        }
    }
}

/// Everything the frame loop renders and the control panel edits.
#[derive(Debug, Clone)]
pub struct Scene {
    pub pyramid: SceneObject,
    pub grid: SceneObject,
    pub camera: Camera,
    pub animation: AnimationFlags,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_camera(Camera::default())
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            pyramid: SceneObject::new(ObjectKind::Pyramid, pyramid_mesh()),
            grid: SceneObject::new(ObjectKind::Grid, grid_mesh(GRID_HALF_EXTENT, GRID_SPACING)),
            camera,
            animation: AnimationFlags::default(),
        }
    }

    pub fn object(&self, kind: ObjectKind) -> &SceneObject {
        match kind {
            ObjectKind::Pyramid => &self.pyramid,
            ObjectKind::Grid => &self.grid,
        }
    }

    pub fn object_mut(&mut self, kind: ObjectKind) -> &mut SceneObject {
        match kind {
            ObjectKind::Pyramid => &mut self.pyramid,
            ObjectKind::Grid => &mut self.grid,
        }
    }

    /// Objects in draw order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        ObjectKind::DRAW_ORDER.into_iter().map(|kind| self.object(kind))
    }
}
