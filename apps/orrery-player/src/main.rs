use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec3;
use orrery_engine::{play, HeadlessWindow, PlayerConfig};
use orrery_input::Action;
use orrery_render::TraceDevice;
use orrery_resources::{MAX_CUBE_MAP, MAX_MESH, MAX_TEXTURE};
use orrery_sim::{Body, Scene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery-player", about = "Solar-system scene player")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print player version and scene info
    Info,
    /// Run the frame loop against the recording backend
    Play {
        /// Number of frames to run before shutting down
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Path to a JSON player config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Evaluate body positions at a given simulated time
    Probe {
        /// Simulated seconds since playback start
        #[arg(short, long, default_value = "0")]
        time: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("orrery-player v{}", env!("CARGO_PKG_VERSION"));
            let config = PlayerConfig::default();
            println!(
                "window: {}x{} \"{}\"",
                config.window.width, config.window.height, config.window.title
            );
            println!(
                "registry capacities: textures={MAX_TEXTURE}, cube maps={MAX_CUBE_MAP}, meshes={MAX_MESH}"
            );
            for action in Action::ALL {
                println!("{:?} -> {action:?}", action.key());
            }
            for body in [Body::Comet, Body::Planet, Body::Moon, Body::Probe, Body::Sun] {
                let start = Scene::body_position(body, 0.0);
                println!(
                    "{body:?}: start={start}, distance={:.2}",
                    start.distance(Vec3::ZERO)
                );
            }
        }
        Commands::Play { frames, config } => {
            let config = match config {
                Some(path) => PlayerConfig::load(&path)?,
                None => PlayerConfig::default(),
            };
            let playback = play(
                HeadlessWindow::with_budget(frames),
                TraceDevice::new(),
                &config,
            )?;
            tracing::debug!(
                frames = playback.frames,
                submissions = playback.device.submissions().len(),
                "playback complete"
            );
            println!(
                "Played {} frames, {} draw submissions, zero leaked allocations",
                playback.frames,
                playback.device.submissions().len()
            );
        }
        Commands::Probe { time } => {
            for body in [Body::Comet, Body::Planet, Body::Moon, Body::Probe, Body::Sun] {
                let pos = Scene::body_position(body, time);
                println!("{body:?} @ t={time}: {pos}");
            }
        }
    }

    Ok(())
}
