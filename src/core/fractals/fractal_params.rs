use std::ops::RangeInclusive;

use glam::Vec4;

pub const DEFAULT_MAX_ITERATIONS: i32 = 100;
pub const MAX_ITERATIONS_RANGE: RangeInclusive<i32> = 0..=500;
pub const JULIA_COMPONENT_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const DEFAULT_COLOR: Vec4 = Vec4::new(0.5, 1.0, 0.7, 1.0);

/// Real and imaginary parts of the Julia set's `c`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JuliaConstant {
    pub real: f32,
    pub imag: f32,
}

/// Presentation settings owned by the settings panel. They never touch the
/// camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParameters {
    pub max_iterations: i32,
    pub color: Vec4,
    pub julia: JuliaConstant,
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            color: DEFAULT_COLOR,
            julia: JuliaConstant::default(),
        }
    }
}

impl FractalParameters {
    /// Pulls every field back into the range the panel offers.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            max_iterations: self
                .max_iterations
                .clamp(*MAX_ITERATIONS_RANGE.start(), *MAX_ITERATIONS_RANGE.end()),
            color: self.color.clamp(Vec4::ZERO, Vec4::ONE),
            julia: JuliaConstant {
                real: clamp_component(self.julia.real),
                imag: clamp_component(self.julia.imag),
            },
        }
    }
}

fn clamp_component(value: f32) -> f32 {
    value.clamp(*JULIA_COMPONENT_RANGE.start(), *JULIA_COMPONENT_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_panel_state() {
        let params = FractalParameters::default();

        assert_eq!(params.max_iterations, 100);
        assert_eq!(params.color, Vec4::new(0.5, 1.0, 0.7, 1.0));
        assert_eq!(params.julia, JuliaConstant::default());
    }

    #[test]
    fn clamped_limits_iterations() {
        let high = FractalParameters {
            max_iterations: 9000,
            ..FractalParameters::default()
        };
        let low = FractalParameters {
            max_iterations: -3,
            ..FractalParameters::default()
        };

        assert_eq!(high.clamped().max_iterations, 500);
        assert_eq!(low.clamped().max_iterations, 0);
    }

    #[test]
    fn clamped_limits_color_and_julia_constant() {
        let params = FractalParameters {
            color: Vec4::new(-1.0, 2.0, 0.5, 1.5),
            julia: JuliaConstant {
                real: 1.5,
                imag: -0.2,
            },
            ..FractalParameters::default()
        };

        let clamped = params.clamped();

        assert_eq!(clamped.color, Vec4::new(0.0, 1.0, 0.5, 1.0));
        assert_eq!(clamped.julia, JuliaConstant { real: 1.0, imag: 0.0 });
    }

    #[test]
    fn in_range_values_are_untouched() {
        let params = FractalParameters::default();

        assert_eq!(params.clamped(), params);
    }
}
