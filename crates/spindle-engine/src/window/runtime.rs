use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{RenderSession, SessionConfig};
use crate::device::GpuInit;
use crate::render::FrameOutcome;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Matches the projection's fixed 4:3 aspect by default.
    pub initial_size: LogicalSize<f64>,

    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "spindle".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed.
    ///
    /// Startup failures (window, device, pipeline) and fatal surface errors
    /// are returned once the event loop has exited.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, session: SessionConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, session);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    session: RenderSession<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    session_config: SessionConfig,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, session_config: SessionConfig) -> Self {
        Self {
            config,
            gpu_init,
            session_config,
            entry: None,
            failure: None,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let session_config = self.session_config.clone();

        let entry = WindowEntryTryBuilder {
            window,
            session_builder: |w| {
                let size = w.inner_size();
                pollster::block_on(RenderSession::create(w, size, gpu_init, session_config))
            },
        }
        .try_build()
        .context("failed to start render session")?;

        Ok(entry)
    }

    /// Records a terminal error and stops the loop. Dropping the entry
    /// releases every GPU object before the window goes away.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.entry = None;
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous animation: ask for the next frame as soon as the loop idles.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; shutting down");
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                entry.with_session_mut(|session| session.resize(size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_session_mut(|session| session.resize(size));
            }

            WindowEvent::RedrawRequested => {
                let outcome = entry.with_mut(|fields| {
                    fields.window.pre_present_notify();
                    fields.session.tick()
                });

                if outcome == FrameOutcome::Fatal {
                    self.fail(event_loop, anyhow!("surface is out of memory"));
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_projection_aspect() {
        let config = RuntimeConfig::default();
        let aspect = config.initial_size.width / config.initial_size.height;
        let camera = crate::transform::Camera::default();
        assert!((aspect as f32 - camera.aspect).abs() < 1e-6);
    }
}
