mod app;
mod panel;

use anyhow::Result;
use app::{GpuApp, WindowConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "meshview-desktop", about = "Interactive grid and pyramid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Start in a normal window instead of maximized
    #[arg(long)]
    windowed: bool,

    /// Start fullscreen on the current monitor
    #[arg(long)]
    fullscreen: bool,

    /// Window width in pixels when not maximized
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Window height in pixels when not maximized
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// WGSL file to use instead of the built-in scene shader
    #[arg(long)]
    shader: Option<PathBuf>,

    /// Window title
    #[arg(long, default_value = "meshview")]
    title: String,
}

impl Cli {
    fn window_config(self) -> WindowConfig {
        WindowConfig {
            title: self.title,
            width: self.width,
            height: self.height,
            maximized: !self.windowed,
            fullscreen: self.fullscreen,
            shader: self.shader,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("meshview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.window_config());
    event_loop.run_app(&mut app)?;

    match app.into_error() {
        Some(err) => Err(err),
        None => {
            tracing::info!("meshview-desktop exiting");
            Ok(())
        }
    }
}
