use glam::DVec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::core::camera::{CameraModel, PointerGate, PointerTracker};

/// Pixel-precise scroll (touchpads) is converted to wheel lines at this rate.
pub const PIXELS_PER_SCROLL_LINE: f64 = 50.0;

#[must_use]
pub fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_SCROLL_LINE,
    }
}

/// Turns raw pointer events into camera zoom and pan.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerInputState {
    primary_held: bool,
    tracker: PointerTracker,
}

impl PointerInputState {
    pub fn handle_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary_held = state == ElementState::Pressed;
        }
    }

    pub fn handle_scroll(
        &self,
        camera: &mut CameraModel,
        delta: MouseScrollDelta,
        ui_captured: bool,
    ) {
        if ui_captured {
            return;
        }

        camera.apply_zoom(scroll_lines(delta));
    }

    /// The position is always tracked, even when the pan is suppressed, so
    /// the next drag starts from where the pointer really is.
    pub fn handle_cursor_moved(
        &mut self,
        camera: &mut CameraModel,
        position: PhysicalPosition<f64>,
        ui_captured: bool,
    ) -> bool {
        let delta = self.tracker.moved_to(DVec2::new(position.x, position.y));

        camera.apply_pan(
            delta,
            PointerGate {
                primary_held: self.primary_held,
                ui_captured,
            },
        )
    }

    #[must_use]
    pub fn primary_held(&self) -> bool {
        self.primary_held
    }

    /// Forgets held buttons, e.g. when focus is lost mid-drag.
    pub fn release(&mut self) {
        self.primary_held = false;
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    fn pressed_at(camera: &mut CameraModel, x: f64, y: f64) -> PointerInputState {
        let mut input = PointerInputState::default();
        input.handle_cursor_moved(camera, PhysicalPosition::new(x, y), false);
        input.handle_button(MouseButton::Left, ElementState::Pressed);
        input
    }

    #[test]
    fn line_and_pixel_scroll_convert_to_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        assert_eq!(
            scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -100.0))),
            -2.0
        );
    }

    #[test]
    fn scroll_zooms_unless_ui_captured() {
        let mut camera = CameraModel::default();
        let input = PointerInputState::default();

        input.handle_scroll(&mut camera, MouseScrollDelta::LineDelta(0.0, 1.0), true);
        assert_eq!(camera.zoom_level(), 200.0);

        input.handle_scroll(&mut camera, MouseScrollDelta::LineDelta(0.0, 1.0), false);
        assert_eq!(camera.zoom_level(), 220.0);
    }

    #[test]
    fn drag_with_primary_button_pans() {
        let mut camera = CameraModel::default();
        let mut input = pressed_at(&mut camera, 100.0, 100.0);

        let panned = input.handle_cursor_moved(&mut camera, PhysicalPosition::new(80.0, 90.0), false);

        assert!(panned);
        assert_eq!(camera.pan_offset(), DVec2::new(-0.1, 0.05));
    }

    #[test]
    fn move_without_button_only_tracks() {
        let mut camera = CameraModel::default();
        let mut input = PointerInputState::default();

        input.handle_cursor_moved(&mut camera, PhysicalPosition::new(100.0, 100.0), false);
        let panned = input.handle_cursor_moved(&mut camera, PhysicalPosition::new(80.0, 90.0), false);

        assert!(!panned);
        assert_eq!(camera.pan_offset(), DVec2::ZERO);
    }

    #[test]
    fn ui_capture_suppresses_pan_but_keeps_tracking() {
        let mut camera = CameraModel::default();
        let mut input = pressed_at(&mut camera, 100.0, 100.0);

        input.handle_cursor_moved(&mut camera, PhysicalPosition::new(50.0, 50.0), true);
        assert_eq!(camera.pan_offset(), DVec2::ZERO);

        input.handle_cursor_moved(&mut camera, PhysicalPosition::new(30.0, 40.0), false);
        assert_eq!(camera.pan_offset(), DVec2::new(-0.1, 0.05));
    }

    #[test]
    fn release_stops_panning() {
        let mut camera = CameraModel::default();
        let mut input = pressed_at(&mut camera, 0.0, 0.0);

        input.release();

        assert!(!input.primary_held());
        assert!(!input.handle_cursor_moved(&mut camera, PhysicalPosition::new(10.0, 10.0), false));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut input = PointerInputState::default();

        input.handle_button(MouseButton::Right, ElementState::Pressed);

        assert!(!input.primary_held());
    }
}
