mod config;
mod sim;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use atoll_runtime::World;
use clap::Parser;

use crate::config::AppConfig;
use crate::sim::Simulation;

/// Headless island world driver: generates, streams and edits a world
/// without a renderer.
#[derive(Parser, Debug)]
#[command(name = "atoll", version, about)]
struct Args {
    /// World seed
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// TOML file with world, streaming and block settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of streaming ticks to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Viewer speed in blocks per tick
    #[arg(long, default_value_t = 2.0)]
    speed: f32,

    /// Override the streaming render radius, in chunks
    #[arg(long)]
    radius: Option<i32>,

    /// Log filter, e.g. `info` or `stream=debug,perf=trace`
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log)
        .parse_env("RUST_LOG")
        .init();

    let mut cfg = AppConfig::load(args.config.as_deref())?;
    if let Some(r) = args.radius {
        cfg.override_render_radius(r)?;
    }
    log::info!(
        "seed={} world={}x{}x{} sea_level={} render_radius={}",
        args.seed,
        cfg.worldgen.dims.width,
        cfg.worldgen.dims.height,
        cfg.worldgen.dims.depth,
        cfg.worldgen.sea_level,
        cfg.runtime.streaming.render_radius
    );

    let initial_radius = cfg.runtime.streaming.initial_radius;
    let world = World::new(args.seed, cfg.worldgen, Arc::new(cfg.registry), cfg.runtime);
    let mut sim = Simulation::new(world, initial_radius);
    let summary = sim.run(args.ticks, args.speed);
    log::info!("{summary}");
    log::debug!("{:?} viewer={:?}", sim.world(), sim.viewer());
    Ok(())
}
