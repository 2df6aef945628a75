//! # engine_app
//!
//! Headless runner for the 2D engine. Builds the demo scene and drives it
//! with the fixed-rate tick loop.
//!
//! ## Startup Sequence
//!
//! 1. Load the engine config (JSON file, optional) and apply CLI overrides.
//! 2. Build the world and the demo scene.
//! 3. Enter the tick loop until `max_ticks` or the platform closes.

mod demo;
mod platform;
mod tick;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use engine_math::SpaceComponent;
use engine_system::{EngineConfig, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use platform::HeadlessPlatform;
use tick::TickLoop;

#[derive(Parser)]
#[command(name = "engine_app", about = "Headless 2D engine runner")]
struct Args {
    /// Path to a JSON engine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target ticks per second
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Stop after this many ticks (0 = unlimited)
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(tick_rate) = args.tick_rate {
        config = config.with_tick_rate(tick_rate);
    }
    if let Some(max_ticks) = args.max_ticks {
        config = config.with_max_ticks(max_ticks);
    }
    config.validate()?;
    info!(?config, "engine starting");

    let world = World::new(config.viewport);
    let mut tick_loop = TickLoop::new(config, world, HeadlessPlatform::default());
    let scene = demo::build(tick_loop.world_mut());

    let ticks = tick_loop.run();

    let position = |entity| {
        tick_loop
            .world()
            .component::<SpaceComponent>(entity)
            .map(|space| space.position)
    };
    let (mover, wall) = (position(scene.mover), position(scene.wall));
    info!(
        ticks,
        tick_id = tick_loop.tick_id(),
        frames = tick_loop.platform().frames(),
        collisions = scene.collisions.get(),
        ?mover,
        ?wall,
        "engine shut down"
    );
    Ok(())
}
