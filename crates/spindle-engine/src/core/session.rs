use std::future::Future;

use winit::dpi::PhysicalSize;

use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::error::Result;
use crate::render::{
    record_triangle_pass, FrameBackend, FrameOutcome, FrameRenderer, MeshSource, TriangleDraw,
    TriangleMesh, TrianglePipeline, UniformBlock, UniformBuffer,
};
use crate::time::FrameClock;
use crate::transform::Camera;

/// Per-session render settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub clear_color: wgpu::Color,

    /// Radians per second about +Z.
    pub rotation_speed: f32,

    pub camera: Camera,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.5,
                g: 0.0,
                b: 0.25,
                a: 1.0,
            },
            rotation_speed: 1.0,
            camera: Camera::default(),
        }
    }
}

/// Owns the device context and every resource built on it.
///
/// Only constructed once all resources exist. Field order is drop order:
/// pipeline objects go before the device and surface they came from.
pub struct RenderSession<'w> {
    renderer: FrameRenderer,
    clock: FrameClock,
    bind_group: wgpu::BindGroup,
    uniforms: UniformBuffer,
    mesh: TriangleMesh,
    pipeline: TrianglePipeline,
    gpu: Gpu<'w>,
}

impl<'w> RenderSession<'w> {
    /// Acquires the device for `target`, then builds the session.
    ///
    /// A `DeviceUnavailable` error returns before any pipeline work starts.
    pub async fn create(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        size: PhysicalSize<u32>,
        gpu_init: GpuInit,
        config: SessionConfig,
    ) -> Result<Self> {
        Self::from_device(Gpu::new(target, size, gpu_init), config, Self::new).await
    }

    /// Awaits `acquire`, then hands the device to `build`.
    ///
    /// `build` never runs when acquisition fails.
    pub(crate) async fn from_device<F, B>(acquire: F, config: SessionConfig, build: B) -> Result<Self>
    where
        F: Future<Output = Result<Gpu<'w>>>,
        B: FnOnce(Gpu<'w>, SessionConfig) -> Result<Self>,
    {
        let gpu = acquire.await?;
        build(gpu, config)
    }

    /// Builds mesh, pipeline, uniform buffer and bind group on `gpu`.
    pub fn new(gpu: Gpu<'w>, config: SessionConfig) -> Result<Self> {
        let device = gpu.device();

        let mesh = TriangleMesh::new(device);
        let pipeline = TrianglePipeline::build(device, mesh.layout(), gpu.surface_format())?;
        let uniforms = UniformBuffer::new(device);
        let bind_group = pipeline.bind_group(device, &uniforms);
        let renderer = FrameRenderer::new(&config.camera, config.clear_color, config.rotation_speed);

        log::info!("render session ready ({:?})", gpu.surface_format());

        Ok(Self {
            renderer,
            clock: FrameClock::new(),
            bind_group,
            uniforms,
            mesh,
            pipeline,
            gpu,
        })
    }

    /// Renders one frame. Called once per host repaint tick.
    pub fn tick(&mut self) -> FrameOutcome {
        let time = self.clock.tick();

        let mut backend = SessionBackend {
            gpu: &mut self.gpu,
            uniforms: &mut self.uniforms,
            draw: TriangleDraw {
                pipeline: &self.pipeline,
                mesh: &self.mesh,
                bind_group: &self.bind_group,
            },
        };

        let outcome = self.renderer.render(&mut backend, time.dt);
        if outcome == FrameOutcome::Skipped {
            log::debug!(
                "frame {} skipped ({} total)",
                time.frame_index,
                self.renderer.frames_skipped()
            );
        }
        outcome
    }

    /// Reconfigures the surface; the projection keeps its fixed aspect.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
        self.clock.reset();
    }

    /// Last uniform contents handed to the device.
    pub fn uniforms(&self) -> &UniformBlock {
        self.uniforms.contents()
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }
}

/// Real-surface `FrameBackend`, borrowed from the session for one tick.
struct SessionBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    uniforms: &'a mut UniformBuffer,
    draw: TriangleDraw<'a>,
}

impl FrameBackend for SessionBackend<'_, '_> {
    type Frame = GpuFrame;

    fn write_uniform(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.uniforms.write(self.gpu.queue(), offset, bytes)
    }

    fn acquire(&mut self) -> std::result::Result<GpuFrame, wgpu::SurfaceError> {
        self.gpu.begin_frame()
    }

    fn recover(&mut self, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        self.gpu.handle_surface_error(err)
    }

    fn record_and_submit(&mut self, mut frame: GpuFrame, clear: wgpu::Color) {
        record_triangle_pass(&mut frame.encoder, &frame.view, clear, &self.draw);
        self.gpu.submit(frame);
    }
}
