use std::sync::mpsc;

use pixels::wgpu;

use crate::adapters::pixel_format::{ChannelOrder, padded_bytes_per_row, padded_rows_to_rgb};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::presenters::wgpu::linker::GpuProgram;
use crate::presenters::wgpu::pass::encode_fractal_pass;
use crate::presenters::wgpu::quad::FullscreenQuad;
use crate::storage::ScreenshotError;

const BYTES_PER_PIXEL: u32 = 4;

fn channel_order(format: wgpu::TextureFormat) -> Result<ChannelOrder, ScreenshotError> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
            Ok(ChannelOrder::Rgba)
        }
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
            Ok(ChannelOrder::Bgra)
        }
        other => Err(ScreenshotError::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Everything needed to redraw one frame off screen.
pub struct OffscreenFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

impl OffscreenFrame<'_> {
    /// Draws `program` into a texture of the viewport's size and reads the
    /// pixels back as RGB, top row first. Blocks until the GPU is done.
    pub fn capture(
        &self,
        program: &GpuProgram,
        uniforms: &[u8],
        quad: &FullscreenQuad,
    ) -> Result<PixelBuffer, ScreenshotError> {
        let order = channel_order(self.format)?;
        let extent = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("screenshot"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bytes_per_row = padded_bytes_per_row(
            self.width,
            BYTES_PER_PIXEL,
            wgpu::COPY_BYTES_PER_ROW_ALIGNMENT,
        );
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("screenshot readback"),
            size: u64::from(bytes_per_row) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        program.upload_uniforms(self.queue, uniforms);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("screenshot"),
            });
        encode_fractal_pass(&mut encoder, &view, Some(program), quad);
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            extent,
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|error| ScreenshotError::Readback(error.to_string()))?
            .map_err(|error| ScreenshotError::Readback(error.to_string()))?;

        let rgb = {
            let mapped = slice.get_mapped_range();
            padded_rows_to_rgb(&mapped, self.width, self.height, bytes_per_row, order)
        };
        readback.unmap();

        Ok(PixelBuffer::from_data(self.width, self.height, rgb)?)
    }
}
