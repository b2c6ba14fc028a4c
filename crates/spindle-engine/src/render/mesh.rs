use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Anything the pipeline can draw: a vertex buffer plus its layout.
pub trait MeshSource {
    fn vertex_buffer(&self) -> &wgpu::Buffer;

    /// Per-vertex layout, consumed verbatim by the pipeline builder.
    fn layout(&self) -> wgpu::VertexBufferLayout<'static>;

    fn vertex_count(&self) -> u32;
}

/// Position-only vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The demo triangle, standing in the x = 0 plane so the camera sees it face-on.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex { position: [0.0, 0.0, 0.5] },
    Vertex { position: [0.0, -0.5, -0.5] },
    Vertex { position: [0.0, 0.5, -0.5] },
];

/// Immutable triangle vertex buffer.
pub struct TriangleMesh {
    buffer: wgpu::Buffer,
}

impl TriangleMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spindle triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { buffer }
    }
}

impl MeshSource for TriangleMesh {
    fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    fn layout(&self) -> wgpu::VertexBufferLayout<'static> {
        Vertex::layout()
    }

    fn vertex_count(&self) -> u32 {
        TRIANGLE_VERTICES.len() as u32
    }
}
