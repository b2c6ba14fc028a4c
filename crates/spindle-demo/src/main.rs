use anyhow::Result;

use spindle_engine::core::SessionConfig;
use spindle_engine::device::GpuInit;
use spindle_engine::logging::{init_logging, LoggingConfig};
use spindle_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let session = SessionConfig::default();
    log::info!(
        "spinning at {} rad/s, clear {:?}",
        session.rotation_speed,
        session.clear_color
    );

    Runtime::run(
        RuntimeConfig {
            title: "spindle · rotating triangle".to_string(),
            ..Default::default()
        },
        GpuInit {
            present_mode: wgpu::PresentMode::AutoVsync,
            ..Default::default()
        },
        session,
    )
}
