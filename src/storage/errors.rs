use thiserror::Error;

use crate::core::data::pixel_buffer::PixelBufferError;

#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("no shader program is loaded for the current fractal")]
    NoProgram,

    #[error("the viewport has no area")]
    EmptyViewport,

    #[error("framebuffer readback failed: {0}")]
    Readback(String),

    #[error("cannot read back texture format {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Buffer(#[from] PixelBufferError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("cannot create screenshot directory: {0}")]
    Io(#[from] std::io::Error),
}
