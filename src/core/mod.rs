//! Domain layer: camera, fractal parameters, shader programs and pixel data.
//! Nothing in here touches a window or a GPU device.

pub mod camera;
pub mod data;
pub mod fractals;
pub mod shader;
