use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::config::ViewerConfig;
use crate::core::camera::CameraError;
use crate::core::shader::ShaderError;
use crate::input::gui::app::GuiApp;
use crate::presenters::wgpu::WgpuPresenter;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] OsError),

    #[error("GPU surface: {0}")]
    Surface(#[from] pixels::Error),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}

pub struct RunGuiCommand {
    config: ViewerConfig,
}

impl RunGuiCommand {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Opens the window and renders until it is closed.
    pub fn execute(self) -> Result<(), GuiError> {
        let event_loop = EventLoop::new()?;
        let [width, height] = self.config.window_size;
        let [min_width, min_height] = self.config.min_window_size;

        // pixels wants a 'static window
        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title(self.config.window_title.as_str())
                .with_inner_size(LogicalSize::new(width, height))
                .with_min_inner_size(LogicalSize::new(min_width, min_height))
                .build(&event_loop)?,
        ));

        let presenter = WgpuPresenter::new(window)?;
        let mut app = GuiApp::new(window, &event_loop, presenter, self.config)?;

        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window().id() => {
                if app.handle_window_event(event) {
                    log::info!("window closed");
                    elwt.exit();
                }
            }
            Event::AboutToWait => app.window().request_redraw(),
            _ => {}
        })?;

        Ok(())
    }
}
