use crate::error::{RenderError, Result};

use super::uniform::UniformBuffer;

/// Embedded WGSL for both stages.
pub const SHADER_SOURCE: &str = include_str!("shaders/triangle.wgsl");

const VS_ENTRY: &str = "vs_main";
const FS_ENTRY: &str = "fs_main";
const UNIFORM_BINDING: u32 = 0;

/// Uniform fields the shader must declare, in `UniformBlock` order.
const TRANSFORM_FIELDS: [&str; 3] = ["model:", "view:", "projection:"];

/// Checks that `source` exposes both entry points and declares the transform
/// struct with the same field order as `UniformBlock`.
pub fn check_shader_contract(source: &str) -> Result<()> {
    for entry in [VS_ENTRY, FS_ENTRY] {
        if !source.contains(&format!("fn {entry}(")) {
            return Err(RenderError::pipeline_build_failed(format!(
                "shader has no `{entry}` entry point"
            )));
        }
    }

    let body = source
        .split_once("struct Transforms")
        .and_then(|(_, rest)| rest.split_once('}'))
        .map(|(body, _)| body)
        .ok_or_else(|| RenderError::pipeline_build_failed("shader has no `Transforms` struct"))?;

    let mut cursor = 0;
    for field in TRANSFORM_FIELDS {
        match body[cursor..].find(field) {
            Some(pos) => cursor += pos + field.len(),
            None => {
                return Err(RenderError::pipeline_build_failed(format!(
                    "`Transforms` fields out of order at `{field}`"
                )));
            }
        }
    }

    Ok(())
}

/// Comparable summary of a built pipeline's fixed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineShape {
    pub topology: wgpu::PrimitiveTopology,
    pub format: wgpu::TextureFormat,
    pub vertex_stride: wgpu::BufferAddress,
    pub vertex_attributes: Vec<wgpu::VertexAttribute>,
    pub uniform_binding: u32,
    pub uniform_visibility: wgpu::ShaderStages,
    pub uniform_size: u64,
}

/// The one render pipeline: triangle list, single vertex-visible uniform.
pub struct TrianglePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    shape: PipelineShape,
}

impl TrianglePipeline {
    /// Builds the pipeline for `mesh_layout` rendering into `format`.
    ///
    /// Shader contract mismatches, compilation errors and vertex layouts the
    /// shader cannot consume are `PipelineBuildFailed`.
    pub fn build(
        device: &wgpu::Device,
        mesh_layout: wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        Self::build_from_source(device, SHADER_SOURCE, mesh_layout, format)
    }

    fn build_from_source(
        device: &wgpu::Device,
        source: &str,
        mesh_layout: wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        check_shader_contract(source)?;

        // Validation errors raised below land in this scope instead of the
        // device's uncaptured-error handler, which panics on native.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spindle triangle shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: UNIFORM_BINDING,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(UniformBuffer::binding_size()),
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spindle transform bgl"),
            entries: &[uniform_entry],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("spindle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let primitive = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        };

        let shape = PipelineShape {
            topology: primitive.topology,
            format,
            vertex_stride: mesh_layout.array_stride,
            vertex_attributes: mesh_layout.attributes.to_vec(),
            uniform_binding: uniform_entry.binding,
            uniform_visibility: uniform_entry.visibility,
            uniform_size: UniformBuffer::binding_size().get(),
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spindle triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[mesh_layout],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(RenderError::pipeline_build_failed(err.to_string()));
        }

        log::debug!("triangle pipeline built for {format:?}");

        Ok(Self {
            pipeline,
            bind_group_layout,
            shape,
        })
    }

    /// Creates the group-0 bind group pointing at `uniforms`.
    pub fn bind_group(&self, device: &wgpu::Device, uniforms: &UniformBuffer) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spindle transform bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: UNIFORM_BINDING,
                resource: uniforms.buffer().as_entire_binding(),
            }],
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn shape(&self) -> &PipelineShape {
        &self.shape
    }
}
