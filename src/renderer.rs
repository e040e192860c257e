use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::driver::DrawSurface;
use crate::geometry::{DrawCommand, Vertex, TRIANGLE_VERTICES};
use crate::shader::{
    ShaderProgram, BLACK_FRAGMENT_SHADER_PATH, RED_FRAGMENT_SHADER_PATH, VERTEX_SHADER_PATH,
};

/// Background color cleared at the start of every frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.4,
    a: 1.0,
};

/// wgpu-backed draw surface: owns the window surface, device, the static
/// vertex buffer, and both shader programs for the process lifetime.
pub struct Renderer {
    // Field order is teardown order: programs first, then the geometry
    // buffer, then the surface and device.
    programs: [ShaderProgram; 2],
    vertex_buffer: wgpu::Buffer,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create window surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Triangle Vertices"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let programs = [
            ShaderProgram::load(
                &device,
                surface_config.format,
                VERTEX_SHADER_PATH,
                RED_FRAGMENT_SHADER_PATH,
                "Red Triangle Program",
            )?,
            ShaderProgram::load(
                &device,
                surface_config.format,
                VERTEX_SHADER_PATH,
                BLACK_FRAGMENT_SHADER_PATH,
                "Black Triangle Program",
            )?,
        ];

        log::info!(
            "renderer initialized: {}x{} surface, {} vertices",
            size.width,
            size.height,
            TRIANGLE_VERTICES.len()
        );

        Ok(Self {
            programs,
            vertex_buffer,
            surface,
            device,
            queue,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a compatible adapter")
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }
}

impl DrawSurface for Renderer {
    fn submit_frame(&mut self, mvp: Mat4, commands: [DrawCommand; 2]) -> Result<()> {
        // Both programs receive the same combined transform.
        for program in &self.programs {
            program.write_transform(&self.queue, mvp);
        }

        let output = self
            .surface
            .get_current_texture()
            .context("failed to acquire surface texture")?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Triangle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            for (program, command) in self.programs.iter().zip(commands) {
                program.draw(&mut render_pass, command);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
