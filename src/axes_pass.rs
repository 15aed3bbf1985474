//! Line render pass for the nested axes.
//!
//! Uniforms are split the way the shader consumes them: view and projection
//! matrices in group 0, updated once per frame, and per-instance model
//! matrices in group 1, stored in one uniform buffer at 256-byte strides
//! and selected per draw with a dynamic offset. Writing a single shared
//! model buffer between draws would not work: `Queue::write_buffer`
//! ordering applies every write before the encoded pass runs, so each
//! nested instance needs its own slice of the buffer.
//!
//! Rendering is two-phase: [`AxesPass::prepare`] uploads a frame's
//! matrices (and may grow the model buffer), then [`AxesPass::render`]
//! records one indexed draw per instance inside an open render pass.

use crate::axes::{AxesMesh, LineVertex};
use crate::gpu::GpuContext;
use crate::math::Mat4;

/// View and projection matrices, uploaded once per frame.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

/// One instance's accumulated model matrix.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
}

// Matches wgpu's default min_uniform_buffer_offset_alignment.
const MODEL_STRIDE: u64 = 256;
const INITIAL_MODEL_CAPACITY: usize = 16;

/// Renders the axes mesh once per queued model matrix, with depth testing.
pub struct AxesPass {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    model_capacity: usize,
    queued_draws: usize,
    /// Depth attachment the render pass must be created with.
    pub depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl AxesPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Axes Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/axes.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<
                            ModelUniforms,
                        >() as u64),
                    },
                    count: None,
                }],
            });

        let (model_buffer, model_bind_group) = Self::create_model_buffer(
            gpu,
            &model_bind_group_layout,
            INITIAL_MODEL_CAPACITY,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Axes Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &model_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Axes Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[LineVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = Self::create_depth_texture(gpu);

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            model_buffer,
            model_bind_group,
            model_bind_group_layout,
            model_capacity: INITIAL_MODEL_CAPACITY,
            queued_draws: 0,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        }
    }

    fn create_model_buffer(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniforms"),
            size: MODEL_STRIDE * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // The dynamic offset selects which stride-sized window binds.
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    fn create_depth_texture(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Axes Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_texture(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Uploads this frame's camera and model matrices.
    ///
    /// Grows the model buffer (doubling) when the instance count exceeds
    /// its capacity; the list itself is unbounded.
    pub fn prepare(&mut self, gpu: &GpuContext, view: &Mat4, proj: &Mat4, models: &[Mat4]) {
        let camera = CameraUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
        };
        gpu.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));

        if models.len() > self.model_capacity {
            let mut capacity = self.model_capacity;
            while capacity < models.len() {
                capacity *= 2;
            }
            log::debug!("growing model uniform buffer to {} instances", capacity);
            let (buffer, bind_group) =
                Self::create_model_buffer(gpu, &self.model_bind_group_layout, capacity);
            self.model_buffer = buffer;
            self.model_bind_group = bind_group;
            self.model_capacity = capacity;
        }

        let mut staged = vec![0u8; MODEL_STRIDE as usize * models.len()];
        for (i, model) in models.iter().enumerate() {
            let uniforms = ModelUniforms {
                model: model.to_cols_array_2d(),
            };
            let start = i * MODEL_STRIDE as usize;
            staged[start..start + std::mem::size_of::<ModelUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&uniforms));
        }
        if !staged.is_empty() {
            gpu.queue.write_buffer(&self.model_buffer, 0, &staged);
        }
        self.queued_draws = models.len();
    }

    /// Records one indexed line draw per prepared model matrix.
    ///
    /// The render pass must use [`AxesPass::depth_view`] as its depth
    /// attachment.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass, mesh: &AxesMesh) {
        if self.queued_draws == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for i in 0..self.queued_draws {
            let offset = (i as u64 * MODEL_STRIDE) as wgpu::DynamicOffset;
            render_pass.set_bind_group(1, &self.model_bind_group, &[offset]);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
