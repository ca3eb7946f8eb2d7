//! Windowed viewer: winit for the window and input, egui for the settings
//! panel, wgpu (through `pixels`) for drawing.

pub mod app;
pub mod commands;
