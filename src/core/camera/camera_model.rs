use glam::DVec2;

use crate::core::camera::limits::{CameraError, CameraLimits, ZOOM_DAMPING};
use crate::core::camera::pointer::{PointerGate, ScreenDelta};

/// Camera values as they are uploaded. The shader maps screen to complex
/// plane; nothing is remapped on the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUniforms {
    pub zoom_level: f64,
    pub pan_offset: DVec2,
    pub viewport_size: DVec2,
}

/// Zoom and pan of the fractal view. Zoom is pixels per fractal unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraModel {
    zoom_level: f64,
    pan_offset: DVec2,
    limits: CameraLimits,
}

impl Default for CameraModel {
    fn default() -> Self {
        let limits = CameraLimits::default();
        Self {
            zoom_level: limits.min_zoom,
            pan_offset: DVec2::ZERO,
            limits,
        }
    }
}

impl CameraModel {
    /// Starts fully zoomed out, centred on the origin.
    pub fn new(limits: CameraLimits) -> Result<Self, CameraError> {
        limits.validate()?;

        Ok(Self {
            zoom_level: limits.min_zoom,
            pan_offset: DVec2::ZERO,
            limits,
        })
    }

    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    #[must_use]
    pub fn pan_offset(&self) -> DVec2 {
        self.pan_offset
    }

    #[must_use]
    pub fn limits(&self) -> CameraLimits {
        self.limits
    }

    /// Scales zoom proportionally to its current value so every scroll step
    /// feels the same at any depth.
    pub fn apply_zoom(&mut self, scroll_delta: f64) {
        if !scroll_delta.is_finite() {
            return;
        }

        let zoom = self.zoom_level
            + scroll_delta * self.limits.zoom_speed * self.zoom_level / ZOOM_DAMPING;

        self.zoom_level = self.limits.clamp_zoom(zoom);
    }

    /// Moves the view by a screen-space drag. Returns whether the pan was
    /// applied.
    pub fn apply_pan(&mut self, delta: ScreenDelta, gate: PointerGate) -> bool {
        if !gate.allows_pan() {
            return false;
        }

        self.pan_offset.x -= delta.x / self.zoom_level;
        self.pan_offset.y -= delta.y / self.zoom_level;
        true
    }

    pub fn reset(&mut self) {
        self.zoom_level = self.limits.min_zoom;
        self.pan_offset = DVec2::ZERO;
    }

    #[must_use]
    pub fn to_shader_uniforms(&self, viewport_size: DVec2) -> CameraUniforms {
        CameraUniforms {
            zoom_level: self.zoom_level,
            pan_offset: self.pan_offset,
            viewport_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAGGING: PointerGate = PointerGate {
        primary_held: true,
        ui_captured: false,
    };

    fn camera_at_zoom(zoom: f64) -> CameraModel {
        let mut camera = CameraModel::default();
        camera.zoom_level = zoom;
        camera
    }

    #[test]
    fn default_camera_starts_at_minimum_zoom() {
        let camera = CameraModel::default();

        assert_eq!(camera.zoom_level(), 200.0);
        assert_eq!(camera.pan_offset(), DVec2::ZERO);
    }

    #[test]
    fn new_rejects_invalid_limits() {
        let limits = CameraLimits {
            min_zoom: -1.0,
            ..CameraLimits::default()
        };

        assert!(CameraModel::new(limits).is_err());
    }

    #[test]
    fn one_scroll_step_adds_a_tenth_of_current_zoom() {
        let mut camera = camera_at_zoom(1000.0);

        camera.apply_zoom(1.0);

        assert_eq!(camera.zoom_level(), 1100.0);
    }

    #[test]
    fn zoom_rate_scales_with_depth() {
        let mut shallow = camera_at_zoom(1_000.0);
        let mut deep = camera_at_zoom(1_000_000.0);

        shallow.apply_zoom(2.0);
        deep.apply_zoom(2.0);

        assert_eq!(shallow.zoom_level() / 1_000.0, deep.zoom_level() / 1_000_000.0);
    }

    #[test]
    fn zoom_is_clamped_at_minimum() {
        let mut camera = camera_at_zoom(250.0);

        camera.apply_zoom(-5.0);

        assert_eq!(camera.zoom_level(), 200.0);
    }

    #[test]
    fn zoom_is_clamped_at_maximum() {
        let mut camera = camera_at_zoom(3.0e15);

        camera.apply_zoom(10.0);

        assert_eq!(camera.zoom_level(), 3.25e15);
    }

    #[test]
    fn zoom_stays_in_bounds_for_any_sequence() {
        let mut camera = CameraModel::default();
        let limits = camera.limits();
        let steps = [3.0, 50.0, -12.0, 400.0, -1000.0, 7.5, 1e6, -0.5, 1e300, -1e300];

        for _ in 0..50 {
            for step in steps {
                camera.apply_zoom(step);
                assert!(camera.zoom_level() >= limits.min_zoom);
                assert!(camera.zoom_level() <= limits.max_zoom);
            }
        }
    }

    #[test]
    fn non_finite_scroll_is_ignored() {
        let mut camera = camera_at_zoom(1000.0);

        camera.apply_zoom(f64::NAN);
        camera.apply_zoom(f64::INFINITY);

        assert_eq!(camera.zoom_level(), 1000.0);
    }

    #[test]
    fn pan_divides_by_zoom_with_asymmetric_axes() {
        let mut camera = camera_at_zoom(200.0);

        let applied = camera.apply_pan(ScreenDelta { x: 20.0, y: -10.0 }, DRAGGING);

        assert!(applied);
        assert_eq!(camera.pan_offset(), DVec2::new(-0.1, 0.05));
    }

    #[test]
    fn pan_is_suppressed_when_ui_captured_input() {
        let mut camera = camera_at_zoom(200.0);
        let gate = PointerGate {
            primary_held: true,
            ui_captured: true,
        };

        let applied = camera.apply_pan(ScreenDelta { x: 20.0, y: -10.0 }, gate);

        assert!(!applied);
        assert_eq!(camera.pan_offset(), DVec2::ZERO);
    }

    #[test]
    fn pan_is_suppressed_without_primary_button() {
        let mut camera = camera_at_zoom(200.0);

        camera.apply_pan(ScreenDelta { x: 20.0, y: -10.0 }, PointerGate::default());

        assert_eq!(camera.pan_offset(), DVec2::ZERO);
    }

    #[test]
    fn reset_restores_initial_view() {
        let mut camera = camera_at_zoom(5000.0);
        camera.apply_pan(ScreenDelta { x: 1.0, y: 1.0 }, DRAGGING);

        camera.reset();

        assert_eq!(camera, CameraModel::default());
    }

    #[test]
    fn shader_uniforms_are_passed_through_verbatim() {
        let mut camera = camera_at_zoom(1234.5);
        camera.apply_pan(ScreenDelta { x: -1234.5, y: 0.0 }, DRAGGING);

        let uniforms = camera.to_shader_uniforms(DVec2::new(1280.0, 720.0));

        assert_eq!(
            uniforms,
            CameraUniforms {
                zoom_level: 1234.5,
                pan_offset: DVec2::new(1.0, 0.0),
                viewport_size: DVec2::new(1280.0, 720.0),
            }
        );
    }
}
