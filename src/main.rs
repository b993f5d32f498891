//! Headless driver for the Warband movement core.
//!
//! Spawns the demo world and runs a fixed-step frame loop with a short
//! scripted input sequence, logging where everything ends up.
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec3;
use log::{debug, info};
use warband::numeric::expect_f32;
use warband::{
    init_logging, spawn_demo_world, ChaseMode, CollisionPolicy, FrameInput, Game,
    SimulationConfig, DEFAULT_FRAME_SECONDS,
};

/// Collision policy choices on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Clamp,
    Slide,
    Steering,
    SteeringReactive,
}

impl From<PolicyArg> for CollisionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Clamp => Self::Clamp,
            PolicyArg::Slide => Self::Slide,
            PolicyArg::Steering => Self::Steering { predictive: true },
            PolicyArg::SteeringReactive => Self::Steering { predictive: false },
        }
    }
}

/// Party and mob movement simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Log filter in `RUST_LOG` syntax
    #[arg(long)]
    log_filter: Option<String>,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Seconds per frame
    #[arg(long, default_value_t = DEFAULT_FRAME_SECONDS)]
    frame_seconds: f64,
    /// Override the collision policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Override the enemy chase mode
    #[arg(long, value_enum)]
    chase_mode: Option<ChaseMode>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.movement.policy = policy.into();
    }
    if let Some(mode) = args.chase_mode {
        config.chase.mode = mode;
    }
    Ok(config)
}

/// Input for `frame` of the demo script.
///
/// The first character walks off, stops, then the party switches and the
/// second character walks the other way.
fn scripted_input(frame: u32) -> FrameInput {
    match frame {
        0..=89 => FrameInput::hold_at(Vec3::new(6.0, 0.0, 4.0)),
        90 | 240 => FrameInput::release(),
        150 => FrameInput::switch(),
        151..=239 => FrameInput::hold_at(Vec3::new(-5.0, 0.0, -3.0)),
        _ => FrameInput::default(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_filter.as_deref());

    ensure!(
        args.frame_seconds.is_finite() && args.frame_seconds > 0.0 && args.frame_seconds <= 1.0,
        "frame duration must be in (0, 1] seconds, got {}",
        args.frame_seconds
    );
    let dt = expect_f32(args.frame_seconds);
    let config = load_config(&args)?;
    info!(
        "policy {:?}, chase mode {:?}",
        config.movement.policy, config.chase.mode
    );

    let mut game = Game::new(&config);
    spawn_demo_world(&mut game).context("spawning demo world")?;

    for frame in 0..args.frames {
        game.handle_input(&scripted_input(frame));
        let decisions = game.update(dt);
        if frame % 60 == 0 {
            debug!("frame {frame}: {decisions:?}");
        }
    }

    for item in game.render_items() {
        info!(
            "{} at ({:.2}, {:.2}, {:.2})",
            item.id, item.position.x, item.position.y, item.position.z
        );
    }
    info!("camera focus {:?}", game.camera().focus());
    Ok(())
}
