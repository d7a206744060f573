// src/main.rs

use sierpinski_raster::{
    config::CONFIG,
    display::HeadlessPresenter,
    orchestrator::{FrameOrchestrator, FrameStatus},
    shading::{shade_frame, ShadeUniforms},
    surface::{HeadlessSurface, Surface},
};

use anyhow::Context; // For context on Results
// Logging
use log::{info, warn};

/// Main entry point for the headless Sierpiński demo.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting sierpinski-raster...");
    let config = &*CONFIG;

    let surface = HeadlessSurface::new(config.surface.row_alignment);
    let presenter = HeadlessPresenter::new();
    let mut orchestrator =
        FrameOrchestrator::new(surface, presenter, config.rasterizer.clone());

    orchestrator
        .resize(config.surface.width, config.surface.height)
        .context("Failed to size the drawing surface")?;
    if let Some(seed) = orchestrator.seed() {
        info!("Vertex selection seed: {}", seed);
    }

    let frame_interval = config.performance.frame_interval();
    loop {
        match orchestrator.process_frame()? {
            FrameStatus::Running => {
                if let Some(interval) = frame_interval {
                    std::thread::sleep(interval);
                }
            }
            FrameStatus::Done => break,
            FrameStatus::AwaitingSize => {
                warn!("Surface has no size, nothing to draw. Exiting.");
                return Ok(());
            }
        }
    }

    let Some(stats) = orchestrator.stats() else {
        return Ok(());
    };
    info!(
        "Finished: {} iterations over {} frames, max count {}, {} skipped writes",
        stats.iterations_done,
        orchestrator.presenter().frames_presented(),
        stats.running_max,
        stats.skipped_writes
    );

    if let Some(path) = &config.output.snapshot_path {
        let surface = orchestrator.surface();
        let layout = surface
            .layout()
            .context("Surface has no layout to snapshot")?;
        let image = shade_frame(
            surface.contents(),
            layout,
            ShadeUniforms::new(stats.running_max),
            &config.shading,
        );
        image
            .save(path)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
