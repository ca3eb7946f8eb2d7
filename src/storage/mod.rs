pub mod errors;
pub mod write_png;

pub use errors::ScreenshotError;
pub use write_png::{screenshot_file_name, write_png, write_screenshot};
