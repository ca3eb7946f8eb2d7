pub mod frame_clock;
pub mod gui_app;
pub mod key_input;
pub mod panel;
pub mod pointer_input;
pub mod state;

pub use gui_app::GuiApp;
