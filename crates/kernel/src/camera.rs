use glam::{Mat4, Vec3};
use meshview_input::{DragTracker, PointerState};

/// World units moved per pixel of middle-button drag.
pub const DRAG_SENSITIVITY: f64 = 5.0;

/// One-shot easing of the camera's X position toward a fixed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupEase {
    pub target_x: f32,
    /// Fraction of the remaining distance covered each frame.
    pub factor: f32,
    /// Distance below which the camera snaps onto the target.
    pub snap_distance: f32,
    active: bool,
}

impl Default for StartupEase {
    fn default() -> Self {
        Self {
            target_x: 500.0,
            factor: 0.08,
            snap_distance: 1.0,
            active: true,
        }
    }
}

impl StartupEase {
    /// An easing that has already finished.
    pub fn finished() -> Self {
        Self {
            active: false,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance `x` by one frame. Returns true on the frame the easing completes.
    fn step(&mut self, x: &mut f32) -> bool {
        if !self.active {
            return false;
        }
        *x += (self.target_x - *x) * self.factor;
        if (*x - self.target_x).abs() < self.snap_distance {
            *x = self.target_x;
            self.active = false;
            return true;
        }
        false
    }
}

/// Look-at camera with a middle-button pan and a startup easing.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
    drag: DragTracker,
    ease: StartupEase,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(1000.0, 500.0, 500.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 45.0,
            z_near: 0.1,
            z_far: 5000.0,
            drag: DragTracker::new(),
            ease: StartupEase::default(),
        }
    }
}

impl Camera {
    /// Replace the startup easing (use [`StartupEase::finished`] to skip it).
    pub fn with_ease(mut self, ease: StartupEase) -> Self {
        self.ease = ease;
        self
    }

    pub fn is_easing(&self) -> bool {
        self.ease.is_active()
    }

    /// Feed this frame's pointer sample. While dragging, pointer motion pans
    /// the camera position in X (inverted) and Y.
    pub fn apply_pointer(&mut self, pointer: &PointerState) {
        if let Some(delta) = self.drag.update(pointer) {
            self.position.x += (-delta.x * DRAG_SENSITIVITY) as f32;
            self.position.y += (delta.y * DRAG_SENSITIVITY) as f32;
        }
    }

    /// Run one frame of the startup easing. No-op once it has finished.
    pub fn ease_step(&mut self) {
        if self.ease.step(&mut self.position.x) {
            tracing::debug!(x = self.position.x, "startup camera easing finished");
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_camera() -> Camera {
        Camera::default().with_ease(StartupEase::finished())
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(1000.0, 500.0, 500.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.fov, 45.0);
        assert!(cam.z_near > 0.0 && cam.z_near < cam.z_far);
        assert!(cam.is_easing());
        let vp = cam.projection_matrix(16.0 / 9.0) * cam.view_matrix();
        assert!(!vp.is_nan());
    }

    #[test]
    fn drag_moves_by_scaled_delta() {
        let mut cam = still_camera();
        let start = cam.position;

        cam.apply_pointer(&PointerState::new(100.0, 100.0, true));
        assert_eq!(cam.position, start);
        cam.apply_pointer(&PointerState::new(110.0, 120.0, true));
        cam.apply_pointer(&PointerState::new(110.0, 120.0, false));

        let moved = cam.position - start;
        assert_eq!(moved, Vec3::new(-10.0 * 5.0, 20.0 * 5.0, 0.0));
    }

    #[test]
    fn drag_net_change_is_path_independent() {
        let mut cam = still_camera();
        let start = cam.position;
        cam.apply_pointer(&PointerState::new(0.0, 0.0, true));
        cam.apply_pointer(&PointerState::new(4.0, -3.0, true));
        cam.apply_pointer(&PointerState::new(-2.0, 6.0, true));
        cam.apply_pointer(&PointerState::new(8.0, 2.0, true));
        cam.apply_pointer(&PointerState::new(8.0, 2.0, false));
        assert_eq!(cam.position - start, Vec3::new(-40.0, 10.0, 0.0));
    }

    #[test]
    fn released_motion_does_not_accumulate() {
        let mut cam = still_camera();
        let start = cam.position;
        cam.apply_pointer(&PointerState::new(0.0, 0.0, true));
        cam.apply_pointer(&PointerState::new(10.0, 0.0, true));
        cam.apply_pointer(&PointerState::new(10.0, 0.0, false));
        cam.apply_pointer(&PointerState::new(500.0, 500.0, false));
        cam.apply_pointer(&PointerState::new(500.0, 500.0, true));
        cam.apply_pointer(&PointerState::new(501.0, 500.0, true));
        assert_eq!(cam.position - start, Vec3::new(-55.0, 0.0, 0.0));
    }

    #[test]
    fn easing_converges_exactly_without_overshoot() {
        let mut cam = Camera::default();
        let target = StartupEase::default().target_x;
        let mut frames = 0;
        while cam.is_easing() {
            let before = cam.position.x;
            cam.ease_step();
            assert!(cam.position.x >= target, "overshot at frame {frames}");
            assert!(cam.position.x <= before);
            frames += 1;
            assert!(frames < 1000, "easing never finished");
        }
        assert_eq!(cam.position.x, target);
    }

    #[test]
    fn easing_is_one_shot() {
        let mut cam = Camera::default();
        while cam.is_easing() {
            cam.ease_step();
        }
        cam.position.x = 2000.0;
        cam.ease_step();
        assert_eq!(cam.position.x, 2000.0);
        assert!(!cam.is_easing());
    }

    #[test]
    fn easing_only_touches_x() {
        let mut cam = Camera::default();
        cam.ease_step();
        assert_eq!(cam.position.x, 1000.0 + (500.0 - 1000.0) * 0.08);
        assert_eq!(cam.position.y, 500.0);
        assert_eq!(cam.position.z, 500.0);
    }

    #[test]
    fn projection_uses_degrees() {
        let cam = still_camera();
        let expected = Mat4::perspective_rh(45f32.to_radians(), 1.5, 0.1, 5000.0);
        assert_eq!(cam.projection_matrix(1.5), expected);
    }

    #[test]
    fn degenerate_look_at_does_not_panic() {
        let mut cam = still_camera();
        cam.target = cam.position;
        let _ = cam.view_matrix();
    }
}
