use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glam::DVec2;
use meshview_input::PointerState;
use meshview_kernel::Scene;
use meshview_render::{BackendCall, FrameInput, FrameMatrices, RecordingBackend, run_frame};
use meshview_tools::{SceneInspector, model_matrix_readouts};
use tracing_subscriber::EnvFilter;

/// Simulated frame interval in seconds.
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "meshview-cli", about = "Headless meshview driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default scene
    Info,
    /// Run frames against the recording backend
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Framebuffer aspect ratio
        #[arg(short, long, default_value = "1.6667")]
        aspect: f32,
        /// Middle-button drag from (x0,y0) to (x1,y1), starting on the first frame
        #[arg(long, value_parser = parse_drag)]
        drag: Option<Drag>,
    },
}

/// A scripted press, move and release of the middle button.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    from: DVec2,
    to: DVec2,
}

impl Drag {
    /// Pointer sample for `frame`: press at `from`, move to `to`, release.
    fn pointer_at(&self, frame: u32) -> PointerState {
        match frame {
            0 => PointerState::new(self.from.x, self.from.y, true),
            1 => PointerState::new(self.to.x, self.to.y, true),
            _ => PointerState::new(self.to.x, self.to.y, false),
        }
    }
}

fn parse_drag(s: &str) -> anyhow::Result<Drag> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid drag coordinates {s:?}"))?;
    let [x0, y0, x1, y1] = values[..] else {
        bail!("drag needs four values x0,y0,x1,y1, got {}", values.len());
    };
    Ok(Drag {
        from: DVec2::new(x0, y0),
        to: DVec2::new(x1, y1),
    })
}

/// Final state of a simulation run.
struct Simulation {
    scene: Scene,
    matrices: Option<FrameMatrices>,
    last_frame: Vec<BackendCall>,
}

fn simulate(frames: u32, aspect: f32, drag: Option<Drag>) -> anyhow::Result<Simulation> {
    if !(aspect.is_finite() && aspect > 0.0) {
        bail!("aspect ratio must be positive, got {aspect}");
    }

    let mut scene = Scene::new();
    let mut backend = RecordingBackend::for_scene(&scene);
    let mut matrices = None;
    let mut last_frame = Vec::new();

    for frame in 0..frames {
        let pointer = drag.map(|d| d.pointer_at(frame)).unwrap_or_default();
        let input = FrameInput::new(pointer, aspect, frame as f32 * FRAME_TIME);
        matrices = Some(
            run_frame(&mut scene, &input, &mut backend)
                .with_context(|| format!("frame {frame} failed"))?,
        );
        last_frame = backend.take_calls();
        tracing::debug!(frame, calls = last_frame.len(), "frame recorded");
    }

    Ok(Simulation {
        scene,
        matrices,
        last_frame,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("meshview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", SceneInspector::summary(&Scene::new()));
        }
        Commands::Simulate {
            frames,
            aspect,
            drag,
        } => {
            println!("Simulating {frames} frames at aspect {aspect:.4}");
            let sim = simulate(frames, aspect, drag)?;

            if !sim.last_frame.is_empty() {
                println!("Last frame:");
                for call in &sim.last_frame {
                    println!("  {call}");
                }
            }
            println!("{}", SceneInspector::summary(&sim.scene));
            if let Some(matrices) = &sim.matrices {
                for readout in model_matrix_readouts(matrices) {
                    println!("{}", readout.title);
                    for row in &readout.rows {
                        println!("  {row}");
                    }
                }
            }
        }
    }

    Ok(())
}
