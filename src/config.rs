//! Startup settings. Everything has a default; nothing is read from disk.

use std::path::{Path, PathBuf};

use crate::core::camera::CameraLimits;
use crate::core::fractals::FractalKinds;

pub const WINDOW_TITLE: &str = "Mandelbrot set";
pub const WINDOW_SIZE: [u32; 2] = [1280, 720];
pub const MIN_WINDOW_SIZE: [u32; 2] = [200, 200];

fn bundled_shader(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("shaders")
        .join(file_name)
}

/// Float width the fractal shaders do their complex-plane maths in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderPrecision {
    /// Needs a device with 64-bit float shader support.
    #[default]
    Double,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub mandelbrot: PathBuf,
    pub julia: PathBuf,
}

impl ShaderPaths {
    /// The shaders shipped in `shaders/` for `precision`.
    #[must_use]
    pub fn bundled(precision: ShaderPrecision) -> Self {
        match precision {
            ShaderPrecision::Double => Self {
                mandelbrot: bundled_shader("mandelbrot_f64.wgsl"),
                julia: bundled_shader("julia_f64.wgsl"),
            },
            ShaderPrecision::Single => Self {
                mandelbrot: bundled_shader("mandelbrot.wgsl"),
                julia: bundled_shader("julia.wgsl"),
            },
        }
    }

    #[must_use]
    pub fn path(&self, kind: FractalKinds) -> &Path {
        match kind {
            FractalKinds::Mandelbrot => &self.mandelbrot,
            FractalKinds::Julia => &self.julia,
        }
    }
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self::bundled(ShaderPrecision::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_size: [u32; 2],
    pub min_window_size: [u32; 2],
    pub shaders: ShaderPaths,
    /// Used instead of `shaders` when the device has no f64 support.
    pub single_precision_shaders: ShaderPaths,
    pub camera: CameraLimits,
    pub screenshot_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_owned(),
            window_size: WINDOW_SIZE,
            min_window_size: MIN_WINDOW_SIZE,
            shaders: ShaderPaths::bundled(ShaderPrecision::Double),
            single_precision_shaders: ShaderPaths::bundled(ShaderPrecision::Single),
            camera: CameraLimits::default(),
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn shader_paths(&self, precision: ShaderPrecision) -> &ShaderPaths {
        match precision {
            ShaderPrecision::Double => &self.shaders,
            ShaderPrecision::Single => &self.single_precision_shaders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shaders_exist() {
        for precision in [ShaderPrecision::Double, ShaderPrecision::Single] {
            let paths = ShaderPaths::bundled(precision);

            for &kind in FractalKinds::ALL {
                assert!(paths.path(kind).is_file(), "{} missing", paths.path(kind).display());
            }
        }
    }

    #[test]
    fn config_picks_shaders_by_precision() {
        let config = ViewerConfig::default();

        assert_eq!(config.shader_paths(ShaderPrecision::Double), &ShaderPaths::default());
        assert!(
            config
                .shader_paths(ShaderPrecision::Single)
                .mandelbrot
                .ends_with("mandelbrot.wgsl")
        );
        assert_ne!(
            config.shader_paths(ShaderPrecision::Double),
            config.shader_paths(ShaderPrecision::Single)
        );
    }

    #[test]
    fn default_config_uses_default_camera_limits() {
        let config = ViewerConfig::default();

        assert_eq!(config.camera, CameraLimits::default());
        assert_eq!(config.window_size, [1280, 720]);
    }
}
