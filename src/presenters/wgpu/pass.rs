use pixels::wgpu;

use crate::controllers::render_loop::controller::BACKGROUND_COLOR;
use crate::presenters::wgpu::linker::GpuProgram;
use crate::presenters::wgpu::quad::FullscreenQuad;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: BACKGROUND_COLOR[0],
    g: BACKGROUND_COLOR[1],
    b: BACKGROUND_COLOR[2],
    a: BACKGROUND_COLOR[3],
};

/// Clears `target` and, when a program is bound, draws the fractal over it.
pub fn encode_fractal_pass(
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    program: Option<&GpuProgram>,
    quad: &FullscreenQuad,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("fractal"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        ..Default::default()
    });

    if let Some(program) = program {
        program.draw(&mut render_pass, quad);
    }
}
