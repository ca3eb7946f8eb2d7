pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
#[cfg(feature = "gui")]
pub mod presenters;
pub mod storage;

pub use config::ViewerConfig;
pub use controllers::render_loop::{FrameError, FrameInputs, RenderLoopController};
pub use crate::core::camera::CameraModel;
pub use crate::core::fractals::{FractalKinds, FractalParameters};
pub use crate::core::shader::{ShaderError, ShaderProgram};

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::{GuiError, RunGuiCommand};
