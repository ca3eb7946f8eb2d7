use thiserror::Error;

use crate::core::fractals::FractalKinds;
use crate::core::shader::ShaderError;

/// A frame that could not be drawn. The loop keeps running; the next frame
/// tries again.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("no usable {kind} shader program")]
    ProgramUnavailable {
        kind: FractalKinds,
        #[source]
        source: ShaderError,
    },

    #[error("surface error: {0}")]
    Surface(String),
}
