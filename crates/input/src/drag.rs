use crate::PointerState;
use glam::DVec2;

/// Interaction mode of the middle-button drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Trigger held; `last` is the pointer position recorded on the previous frame.
    Dragging { last: DVec2 },
}

/// Two-state drag machine fed with one pointer sample per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Advance with this frame's pointer sample.
    ///
    /// Returns the pointer delta since the previous frame while a drag is in
    /// progress. The press frame only records the anchor.
    pub fn update(&mut self, pointer: &PointerState) -> Option<DVec2> {
        match (self.state, pointer.middle_pressed) {
            (DragState::Idle, true) => {
                self.state = DragState::Dragging {
                    last: pointer.position,
                };
                tracing::trace!(x = pointer.position.x, y = pointer.position.y, "drag start");
                None
            }
            (DragState::Dragging { last }, true) => {
                self.state = DragState::Dragging {
                    last: pointer.position,
                };
                Some(pointer.position - last)
            }
            (DragState::Dragging { .. }, false) => {
                self.state = DragState::Idle;
                tracing::trace!("drag end");
                None
            }
            (DragState::Idle, false) => None,
        }
    }
}
