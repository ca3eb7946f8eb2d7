//! Frame-by-frame orchestration between the camera, the settings panel and
//! the shader programs.

pub mod controller;
pub mod errors;

pub use controller::{FrameInputs, RenderLoopController, ShaderPrograms};
pub use errors::FrameError;
