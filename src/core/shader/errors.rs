use std::path::PathBuf;

use thiserror::Error;

use crate::core::shader::stage::ShaderStageKind;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader resource {}: {source}", path.display())]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile {stage} shader:\n{diagnostic}")]
    Compile {
        stage: ShaderStageKind,
        diagnostic: String,
    },

    #[error("failed to link shader program:\n{diagnostic}")]
    Link { diagnostic: String },

    /// Bind was requested on a program that has never loaded successfully.
    #[error("shader program bound before it was loaded")]
    NotLoaded,
}
