pub mod camera_model;
pub mod limits;
pub mod pointer;

pub use camera_model::{CameraModel, CameraUniforms};
pub use limits::{CameraError, CameraLimits};
pub use pointer::{PointerGate, PointerTracker, ScreenDelta};
