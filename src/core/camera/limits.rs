use thiserror::Error;

pub const MIN_ZOOM_LEVEL: f64 = 200.0;
pub const MAX_ZOOM_LEVEL: f64 = 3.25e15;
pub const ZOOM_SPEED: f64 = 1.0;

/// Divides every scroll step so one notch changes zoom by a tenth.
pub const ZOOM_DAMPING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CameraError {
    #[error("zoom range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("zoom speed must be finite, got {0}")]
    InvalidZoomSpeed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_speed: f64,
}

impl CameraLimits {
    pub fn validate(&self) -> Result<(), CameraError> {
        let range_ok = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom;

        if !range_ok {
            return Err(CameraError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        if !self.zoom_speed.is_finite() {
            return Err(CameraError::InvalidZoomSpeed(self.zoom_speed));
        }

        Ok(())
    }

    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM_LEVEL,
            max_zoom: MAX_ZOOM_LEVEL,
            zoom_speed: ZOOM_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_valid() {
        let limits = CameraLimits::default();

        assert!(limits.validate().is_ok());
        assert_eq!(limits.min_zoom, 200.0);
        assert_eq!(limits.max_zoom, 3.25e15);
        assert_eq!(limits.zoom_speed, 1.0);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let limits = CameraLimits {
            min_zoom: 10.0,
            max_zoom: 1.0,
            ..CameraLimits::default()
        };

        assert_eq!(
            limits.validate(),
            Err(CameraError::InvalidZoomRange { min: 10.0, max: 1.0 })
        );
    }

    #[test]
    fn non_positive_minimum_is_rejected() {
        let limits = CameraLimits {
            min_zoom: 0.0,
            ..CameraLimits::default()
        };

        assert!(limits.validate().is_err());
    }

    #[test]
    fn non_finite_speed_is_rejected() {
        let limits = CameraLimits {
            zoom_speed: f64::NAN,
            ..CameraLimits::default()
        };

        assert!(matches!(
            limits.validate(),
            Err(CameraError::InvalidZoomSpeed(_))
        ));
    }

    #[test]
    fn clamp_zoom_bounds_both_ends() {
        let limits = CameraLimits::default();

        assert_eq!(limits.clamp_zoom(1.0), 200.0);
        assert_eq!(limits.clamp_zoom(1e20), 3.25e15);
        assert_eq!(limits.clamp_zoom(5000.0), 5000.0);
    }
}
