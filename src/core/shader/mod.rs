//! GPU shader programs: resource splitting, stage compilation, uniform
//! reflection and host-side uniform staging.

pub mod binding;
pub mod errors;
pub mod layout;
pub mod ports;
pub mod program;
pub mod source;
pub mod stage;
pub mod uniforms;

pub use binding::{ProgramBinding, ProgramId};
pub use errors::ShaderError;
pub use program::ShaderProgram;
