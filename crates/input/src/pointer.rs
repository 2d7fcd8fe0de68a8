use glam::DVec2;

/// Snapshot of the pointer as seen at the start of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Cursor position in window pixels.
    pub position: DVec2,
    /// Whether the drag trigger (middle button) is held.
    pub middle_pressed: bool,
}

impl PointerState {
    pub fn new(x: f64, y: f64, middle_pressed: bool) -> Self {
        Self {
            position: DVec2::new(x, y),
            middle_pressed,
        }
    }

    pub fn moved_to(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }

    pub fn set_middle(&mut self, pressed: bool) {
        self.middle_pressed = pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_released_at_origin() {
        let p = PointerState::default();
        assert_eq!(p.position, DVec2::ZERO);
        assert!(!p.middle_pressed);
    }

    #[test]
    fn events_fold_into_state() {
        let mut p = PointerState::default();
        p.moved_to(12.5, 40.0);
        p.set_middle(true);
        assert_eq!(p, PointerState::new(12.5, 40.0, true));
    }
}
