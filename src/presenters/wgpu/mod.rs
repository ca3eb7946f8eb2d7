//! GPU side of the viewer: pipelines, the fullscreen quad and frame
//! presentation through the `pixels` surface.

pub mod linker;
pub mod pass;
pub mod presenter;
pub mod quad;
pub mod readback;

pub use linker::{GpuProgram, WgpuProgramLinker};
pub use presenter::WgpuPresenter;
