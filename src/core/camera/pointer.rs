use glam::DVec2;

/// Pointer movement in screen pixels, already in the camera's axis
/// convention: `x = last_x - new_x`, `y = new_y - last_y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenDelta {
    pub x: f64,
    pub y: f64,
}

/// Pointer state that decides whether a move pans the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerGate {
    pub primary_held: bool,
    pub ui_captured: bool,
}

impl PointerGate {
    #[must_use]
    pub const fn allows_pan(self) -> bool {
        self.primary_held && !self.ui_captured
    }
}

/// Remembers the last pointer position so moves can be turned into deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerTracker {
    last_position: DVec2,
}

impl PointerTracker {
    /// Records `position` and returns the delta from the previous one.
    pub fn moved_to(&mut self, position: DVec2) -> ScreenDelta {
        let delta = ScreenDelta {
            x: self.last_position.x - position.x,
            y: position.y - self.last_position.y,
        };
        self.last_position = position;
        delta
    }

    #[cfg(test)]
    #[must_use]
    pub fn last_position(&self) -> DVec2 {
        self.last_position
    }
}
