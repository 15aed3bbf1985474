//! The fixed axes geometry: three unit-length colored line segments.
//!
//! Every instance in the demo draws the same mesh (X in red, Y in green,
//! Z in blue, each running from the origin to 1.0 along its axis) under a
//! different accumulated model matrix.

use crate::gpu::GpuContext;

/// A vertex for line rendering: position plus per-vertex color.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    /// wgpu vertex buffer layout: 24 bytes per vertex, position at
    /// location 0 and color at location 1.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// GPU-resident line geometry for one set of coordinate axes.
#[derive(Debug)]
pub struct AxesMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl AxesMesh {
    /// Uploads the unit axes: six vertices, three line segments.
    pub fn new(gpu: &GpuContext) -> Self {
        let vertices = [
            LineVertex::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            LineVertex::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            LineVertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            LineVertex::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
            LineVertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            LineVertex::new([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
        ];
        let indices: [u32; 6] = [0, 1, 2, 3, 4, 5];

        Self::from_lines(gpu, &vertices, &indices)
    }

    /// Creates a line mesh from raw vertex and index data.
    pub fn from_lines(gpu: &GpuContext, vertices: &[LineVertex], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}
