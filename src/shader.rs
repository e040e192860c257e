use std::borrow::Cow;
use std::fs;

use anyhow::{Context, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::{DrawCommand, Vertex};
use crate::transform::TransformUniform;

/// Vertex stage shared by both programs.
pub const VERTEX_SHADER_PATH: &str = "shaders/triangle.vert";
/// Fragment stage for triangle A.
pub const RED_FRAGMENT_SHADER_PATH: &str = "shaders/red.frag";
/// Fragment stage for triangle B.
pub const BLACK_FRAGMENT_SHADER_PATH: &str = "shaders/black.frag";

/// Read a GLSL stage source from its fixed relative path.
pub fn read_source(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read shader source `{path}`"))
}

fn compile_stage(
    device: &wgpu::Device,
    path: &str,
    stage: wgpu::naga::ShaderStage,
    label: &str,
) -> Result<wgpu::ShaderModule> {
    let source = read_source(path)?;
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(source),
            stage,
            defines: Default::default(),
        },
    }))
}

/// A linked shader program: render pipeline plus its MVP uniform binding.
///
/// Compiled once at startup from a vertex/fragment GLSL source pair and
/// dropped at shutdown. The transform uniform lives at group 0, binding 0.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    transform_buffer: wgpu::Buffer,
}

impl ShaderProgram {
    /// Compile and link a vertex/fragment source pair into a program
    /// targeting the given surface format.
    pub fn load(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vertex_path: &str,
        fragment_path: &str,
        label: &str,
    ) -> Result<Self> {
        let vertex_module =
            compile_stage(device, vertex_path, wgpu::naga::ShaderStage::Vertex, label)?;
        let fragment_module =
            compile_stage(device, fragment_path, wgpu::naga::ShaderStage::Fragment, label)?;

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[TransformUniform::from_mat4(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            bind_group,
            transform_buffer,
        })
    }

    /// Upload the combined transform to this program's MVP uniform.
    pub fn write_transform(&self, queue: &wgpu::Queue, mvp: Mat4) {
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::cast_slice(&[TransformUniform::from_mat4(mvp)]),
        );
    }

    /// Activate this program and draw the command's vertex range.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, command: DrawCommand) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(command.vertex_range(), 0..1);
    }
}
