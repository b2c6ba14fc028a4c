use super::mesh::MeshSource;
use super::pipeline::TrianglePipeline;

/// Everything a triangle draw binds, borrowed for one pass.
pub struct TriangleDraw<'a> {
    pub pipeline: &'a TrianglePipeline,
    pub mesh: &'a dyn MeshSource,
    pub bind_group: &'a wgpu::BindGroup,
}

/// Records the clear + single draw into `encoder` targeting `view`.
pub fn record_triangle_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    clear: wgpu::Color,
    draw: &TriangleDraw<'_>,
) {
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("spindle triangle pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_pipeline(draw.pipeline.pipeline());
    rpass.set_vertex_buffer(0, draw.mesh.vertex_buffer().slice(..));
    rpass.set_bind_group(0, draw.bind_group, &[]);
    rpass.draw(0..draw.mesh.vertex_count(), 0..1);
}
