use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Unit axis for the third rotation step: halfway between +X and +Z.
const DIAGONAL_XZ_AXIS: Vec3 = Vec3::new(
    std::f32::consts::FRAC_1_SQRT_2,
    0.0,
    std::f32::consts::FRAC_1_SQRT_2,
);

/// A single mesh vertex: position plus RGBA colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    /// Byte offset of `color` inside one vertex record.
    pub const COLOR_OFFSET: usize = std::mem::offset_of!(Vertex, color);

    /// Size in bytes of one vertex record (the attribute stride).
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// User-editable object transform: translation, Euler rotation in degrees, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec3,
    /// Rotation per axis, in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Compose the model matrix.
    ///
    /// Order is fixed: translate, rotate about X, rotate about Y, rotate about
    /// the diagonal X/Z axis (driven by `rotation.z`), then scale. The third
    /// step is intentionally not a pure Z rotation.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translate)
            * Mat4::from_axis_angle(Vec3::X, self.rotation.x.to_radians())
            * Mat4::from_axis_angle(Vec3::Y, self.rotation.y.to_radians())
            * Mat4::from_axis_angle(DIAGONAL_XZ_AXIS, self.rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }
}
