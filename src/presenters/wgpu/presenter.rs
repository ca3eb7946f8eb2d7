use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::window::Window;

use crate::config::ShaderPrecision;
use crate::controllers::render_loop::FrameError;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::shader::ShaderProgram;
use crate::presenters::wgpu::linker::{GpuProgram, WgpuProgramLinker};
use crate::presenters::wgpu::pass::encode_fractal_pass;
use crate::presenters::wgpu::quad::FullscreenQuad;
use crate::presenters::wgpu::readback::OffscreenFrame;
use crate::storage::ScreenshotError;

/// Owns the window surface. The fractal is drawn straight into the surface
/// texture and egui on top of it; the pixels framebuffer itself stays unused.
pub struct WgpuPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    quad: FullscreenQuad,
    precision: ShaderPrecision,
    width: u32,
    height: u32,
}

/// Asks for `SHADER_F64` first and settles for a plain device when the
/// adapter cannot provide it.
fn create_pixels(window: &'static Window) -> Result<(Pixels<'static>, ShaderPrecision), pixels::Error> {
    let size = window.inner_size();

    let with_f64 = PixelsBuilder::new(1, 1, SurfaceTexture::new(size.width, size.height, window))
        .device_descriptor(wgpu::DeviceDescriptor {
            label: Some("fractal viewer"),
            required_features: wgpu::Features::SHADER_F64,
            required_limits: wgpu::Limits::default(),
        })
        .build();

    match with_f64 {
        Ok(pixels) => Ok((pixels, ShaderPrecision::Double)),
        Err(error) => {
            log::warn!("no 64-bit float shader support ({error}), rendering in f32");
            let surface_texture = SurfaceTexture::new(size.width, size.height, window);
            let pixels = Pixels::new(1, 1, surface_texture)?;
            Ok((pixels, ShaderPrecision::Single))
        }
    }
}

impl WgpuPresenter {
    pub fn new(window: &'static Window) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let (pixels, precision) = create_pixels(window)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );
        let quad = FullscreenQuad::new(pixels.device());

        Ok(Self {
            pixels,
            egui_renderer,
            quad,
            precision,
            width: size.width,
            height: size.height,
        })
    }

    #[must_use]
    pub fn linker(&self) -> WgpuProgramLinker<'_> {
        WgpuProgramLinker::new(self.pixels.device(), self.pixels.render_texture_format())
    }

    /// Which bundled shader set this device can run.
    #[must_use]
    pub fn precision(&self) -> ShaderPrecision {
        self.precision
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FrameError> {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels
            .resize_surface(width, height)
            .map_err(|error| FrameError::Surface(error.to_string()))
    }

    /// Presents one frame. With no program the background is still cleared
    /// and the panel drawn, so errors stay visible.
    pub fn render(
        &mut self,
        program: Option<&ShaderProgram<GpuProgram>>,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let drawable = program.and_then(|program| {
            let handle = program.handle()?;
            Some((handle, program.uniform_bytes().unwrap_or_default()))
        });

        self.pixels
            .render_with(|encoder, render_target, context| {
                if let Some((handle, bytes)) = drawable {
                    handle.upload_uniforms(&context.queue, bytes);
                }
                encode_fractal_pass(
                    encoder,
                    render_target,
                    drawable.map(|(handle, _)| handle),
                    &self.quad,
                );

                let clipped_primitives =
                    egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [self.width, self.height],
                    pixels_per_point: egui_ctx.pixels_per_point(),
                };

                let textures_delta = egui_output.textures_delta;

                for (id, delta) in &textures_delta.set {
                    self.egui_renderer
                        .update_texture(&context.device, &context.queue, *id, delta);
                }

                self.egui_renderer.update_buffers(
                    &context.device,
                    &context.queue,
                    encoder,
                    &clipped_primitives,
                    &screen_descriptor,
                );

                // Panel goes over the fractal
                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: render_target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    });

                    self.egui_renderer.render(
                        &mut render_pass,
                        &clipped_primitives,
                        &screen_descriptor,
                    );
                }

                for id in &textures_delta.free {
                    self.egui_renderer.free_texture(id);
                }

                Ok(())
            })
            .map_err(|error| FrameError::Surface(error.to_string()))
    }

    /// Redraws `program` off screen at the viewport's size and returns its
    /// pixels. The settings panel is not part of the capture.
    pub fn capture(
        &self,
        program: &ShaderProgram<GpuProgram>,
    ) -> Result<PixelBuffer, ScreenshotError> {
        let Some(handle) = program.handle() else {
            return Err(ScreenshotError::NoProgram);
        };

        if self.width == 0 || self.height == 0 {
            return Err(ScreenshotError::EmptyViewport);
        }

        OffscreenFrame {
            device: self.pixels.device(),
            queue: self.pixels.queue(),
            format: self.pixels.render_texture_format(),
            width: self.width,
            height: self.height,
        }
        .capture(handle, program.uniform_bytes().unwrap_or_default(), &self.quad)
    }
}
