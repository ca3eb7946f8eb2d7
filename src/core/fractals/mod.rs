pub mod fractal_kinds;
pub mod fractal_params;

pub use fractal_kinds::FractalKinds;
pub use fractal_params::{FractalParameters, JuliaConstant};
