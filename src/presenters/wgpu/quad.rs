use pixels::wgpu;
use pixels::wgpu::util::DeviceExt;

/// Corners of the clip-space square, counter-clockwise from bottom left.
pub const QUAD_VERTICES: [[f32; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// The two triangles every fractal is drawn onto. Built once at startup.
#[derive(Debug)]
pub struct FullscreenQuad {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
}

impl FullscreenQuad {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { vertices, indices }
    }

    #[must_use]
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_bytes_match_layout_stride() {
        let layout = FullscreenQuad::vertex_layout();
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        let index_bytes: &[u8] = bytemuck::cast_slice(&QUAD_INDICES);

        assert_eq!(vertex_bytes.len() as u64, layout.array_stride * QUAD_VERTICES.len() as u64);
        assert_eq!(index_bytes.len(), QUAD_INDICES.len() * 4);
        assert_eq!(bytemuck::pod_read_unaligned::<f32>(&vertex_bytes[12..16]), 1.0);
    }
}
