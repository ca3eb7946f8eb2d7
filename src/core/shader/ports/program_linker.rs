use crate::core::shader::errors::ShaderError;
use crate::core::shader::stage::LinkedStages;

/// Turns compiled stages into a GPU program handle.
///
/// The handle owns the GPU resources; dropping it releases them.
pub trait ProgramLinkerPort {
    type Handle;

    fn link(&self, stages: &LinkedStages) -> Result<Self::Handle, ShaderError>;
}
