use std::borrow::Cow;

use pixels::wgpu;

use crate::core::shader::ShaderError;
use crate::core::shader::ports::program_linker::ProgramLinkerPort;
use crate::core::shader::stage::{CompiledStage, LinkedStages};
use crate::presenters::wgpu::quad::FullscreenQuad;

/// Uniform buffer plus the bind group exposing it at `@group(0) @binding(0)`.
#[derive(Debug)]
pub struct GpuUniforms {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// A linked render pipeline. Dropping it releases the GPU objects.
#[derive(Debug)]
pub struct GpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    uniforms: Option<GpuUniforms>,
}

impl GpuProgram {
    /// Uploads the staged uniform bytes. The buffer was sized from the same
    /// layout, so `bytes` always fits.
    pub fn upload_uniforms(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        if let Some(uniforms) = &self.uniforms {
            queue.write_buffer(&uniforms.buffer, 0, bytes);
        }
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, quad: &'a FullscreenQuad) {
        pass.set_pipeline(&self.pipeline);
        if let Some(uniforms) = &self.uniforms {
            pass.set_bind_group(0, &uniforms.bind_group, &[]);
        }
        quad.draw(pass);
    }
}

impl Drop for GpuProgram {
    fn drop(&mut self) {
        log::debug!("releasing pipeline {}", self.label);
    }
}

/// Turns validated WGSL stages into wgpu render pipelines.
pub struct WgpuProgramLinker<'a> {
    device: &'a wgpu::Device,
    target_format: wgpu::TextureFormat,
}

impl<'a> WgpuProgramLinker<'a> {
    #[must_use]
    pub fn new(device: &'a wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            target_format,
        }
    }

    fn shader_module(&self, label: &str, stage: &CompiledStage) -> wgpu::ShaderModule {
        self.device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{label} ({})", stage.kind)),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&stage.source)),
            })
    }

    fn create_uniforms(
        &self,
        label: &str,
        buffer_size: u64,
    ) -> (wgpu::BindGroupLayout, GpuUniforms) {
        let layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: buffer_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        (layout, GpuUniforms { buffer, bind_group })
    }

    fn create_pipeline(
        &self,
        stages: &LinkedStages,
    ) -> (wgpu::RenderPipeline, Option<GpuUniforms>) {
        let label = stages.label.as_str();
        let vertex_module = self.shader_module(label, &stages.vertex);
        let fragment_module = self.shader_module(label, &stages.fragment);

        let (bind_group_layout, uniforms) = match &stages.uniforms {
            Some(layout) => {
                let (bind_group_layout, uniforms) =
                    self.create_uniforms(label, u64::from(layout.buffer_size()));
                (Some(bind_group_layout), Some(uniforms))
            }
            None => (None, None),
        };

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: &bind_group_layouts,
                push_constant_ranges: &[],
            });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex_module,
                    entry_point: &stages.vertex.entry_point,
                    buffers: &[FullscreenQuad::vertex_layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &fragment_module,
                    entry_point: &stages.fragment.entry_point,
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.target_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        (pipeline, uniforms)
    }
}

impl ProgramLinkerPort for WgpuProgramLinker<'_> {
    type Handle = GpuProgram;

    fn link(&self, stages: &LinkedStages) -> Result<GpuProgram, ShaderError> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let (pipeline, uniforms) = self.create_pipeline(stages);

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(ShaderError::Link {
                diagnostic: error.to_string(),
            });
        }

        Ok(GpuProgram {
            label: stages.label.clone(),
            pipeline,
            uniforms,
        })
    }
}
