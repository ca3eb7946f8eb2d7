use chrono::Local;
use egui::Context;
use egui_winit::State as EguiWinitState;
use glam::DVec2;
use winit::event::WindowEvent;
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::config::ViewerConfig;
use crate::controllers::render_loop::{FrameInputs, RenderLoopController};
use crate::core::shader::ShaderError;
use crate::input::gui::commands::run_gui::GuiError;
use crate::input::gui::app::frame_clock::FrameClock;
use crate::input::gui::app::key_input::KeyCommand;
use crate::input::gui::app::panel::{PanelActions, show_settings_panel};
use crate::input::gui::app::pointer_input::PointerInputState;
use crate::input::gui::app::state::{ViewerState, describe_load_failures};
use crate::presenters::wgpu::{GpuProgram, WgpuPresenter};
use crate::storage::write_screenshot;

fn report_error(state: &mut ViewerState, message: String) {
    if state.report_error(message.clone()) {
        log::error!("{message}");
    }
}

fn report_frame_error(state: &mut ViewerState, message: String) {
    if state.report_frame_error(message.clone()) {
        log::error!("{message}");
    }
}

/// The application context handed to every event handler.
pub struct GuiApp {
    window: &'static Window,
    config: ViewerConfig,
    // Declared before the presenter: pipelines go before the device.
    controller: RenderLoopController<GpuProgram>,
    presenter: WgpuPresenter,
    state: ViewerState,
    pointer: PointerInputState,
    clock: FrameClock,
    screenshot_pending: bool,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl GuiApp {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<()>,
        presenter: WgpuPresenter,
        config: ViewerConfig,
    ) -> Result<Self, GuiError> {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None, // max_texture_side, use default
        );

        let precision = presenter.precision();
        log::info!("using {precision:?} precision shaders");

        let mut app = Self {
            window,
            controller: RenderLoopController::new(config.shader_paths(precision).clone()),
            presenter,
            state: ViewerState::new(config.camera)?,
            config,
            pointer: PointerInputState::default(),
            clock: FrameClock::default(),
            screenshot_pending: false,
            egui_ctx,
            egui_state,
        };

        // A resource that cannot even be read is fatal at startup; compile
        // and link errors are shown in the panel instead.
        let mut failures = app.controller.load_all(&app.presenter.linker());
        if let Some(index) = failures
            .iter()
            .position(|(_, error)| matches!(error, ShaderError::ResourceLoad { .. }))
        {
            return Err(failures.swap_remove(index).1.into());
        }
        if !failures.is_empty() {
            app.state.report_error(describe_load_failures(&failures));
        }

        Ok(app)
    }

    #[must_use]
    pub fn window(&self) -> &'static Window {
        self.window
    }

    /// Loads every variant's shader again. Variants that fail keep drawing
    /// with their previous program.
    pub fn reload_shaders(&mut self) {
        let failures = self.controller.load_all(&self.presenter.linker());

        if failures.is_empty() {
            self.state.clear_error();
            self.state.set_status("Shaders loaded");
        } else {
            self.state.report_error(describe_load_failures(&failures));
        }
    }

    /// Feeds one window event to egui, then to the camera. Returns `true`
    /// when the window should close.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let _ = self.egui_state.on_window_event(self.window, event);
        let ui_captured = self.controller.ui_captured_pointer();

        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.window.inner_size();
                self.resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => self.pointer.release(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.handle_button(*button, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.pointer
                    .handle_scroll(&mut self.state.camera, *delta, ui_captured);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer
                    .handle_cursor_moved(&mut self.state.camera, *position, ui_captured);
            }
            WindowEvent::KeyboardInput { event, .. } if !self.egui_ctx.wants_keyboard_input() => {
                match KeyCommand::from_event(event) {
                    Some(KeyCommand::Screenshot) => self.screenshot_pending = true,
                    Some(KeyCommand::ReloadShaders) => self.reload_shaders(),
                    None => {}
                }
            }
            _ => {}
        }

        false
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Err(error) = self.presenter.resize(width, height) {
            report_frame_error(&mut self.state, error.to_string());
        }
    }

    fn run_panel(&mut self) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(self.window);
        let fps = self.clock.fps();
        let mut actions = PanelActions::default();

        let output = self.egui_ctx.run(raw_input, |ctx| {
            actions = show_settings_panel(ctx, &mut self.state, fps);
        });

        if actions.reset_view {
            self.state.reset_view();
        }
        if actions.reload_shaders {
            self.reload_shaders();
        }
        if actions.screenshot {
            self.screenshot_pending = true;
        }

        output
    }

    /// One iteration of the render loop: panel, uniforms, draw, present.
    fn redraw(&mut self) {
        self.clock.tick();

        let mut egui_output = self.run_panel();
        let platform_output = std::mem::take(&mut egui_output.platform_output);
        self.egui_state
            .handle_platform_output(self.window, platform_output);

        let (width, height) = self.presenter.size();
        let params = self.state.params;
        let inputs = FrameInputs {
            kind: self.state.selected_fractal,
            camera: self
                .state
                .camera
                .to_shader_uniforms(DVec2::new(f64::from(width), f64::from(height))),
            params: &params,
        };

        let result = match self.controller.prepare_frame(&inputs) {
            Ok(program) => {
                if std::mem::take(&mut self.screenshot_pending) {
                    let saved = self.presenter.capture(program).and_then(|buffer| {
                        write_screenshot(&buffer, &self.config.screenshot_dir, &Local::now())
                    });
                    match saved {
                        Ok(path) => self.state.set_status(format!("Saved {}", path.display())),
                        Err(error) => {
                            report_error(&mut self.state, format!("Screenshot failed: {error}"));
                        }
                    }
                }
                self.presenter
                    .render(Some(program), egui_output, &self.egui_ctx)
                    .map(|()| self.state.clear_frame_error())
            }
            Err(error) => {
                self.screenshot_pending = false;
                let message = match std::error::Error::source(&error) {
                    Some(source) => format!("{error}: {source}"),
                    None => error.to_string(),
                };
                report_frame_error(&mut self.state, message);
                self.presenter.render(None, egui_output, &self.egui_ctx)
            }
        };

        if let Err(error) = result {
            report_frame_error(&mut self.state, error.to_string());
        }

        self.controller
            .finish_frame(self.egui_ctx.wants_pointer_input());
    }
}
