// src/orchestrator.rs
//! Drives the rasterizer from a frame loop.
//!
//! The orchestrator plays the part of a display's refresh callback: it waits
//! for a non-zero size, builds a rasterizer for it, and on every frame locks
//! the surface, advances the rasterizer, unlocks, and hands the buffer plus
//! the running maximum to the presenter. Once the rasterizer is done the
//! image is final and frames stop being drawn or presented.

use crate::{
    config::RasterizerSettings,
    display::Presenter,
    rasterizer::{RasterizerStats, SierpinskiRasterizer},
    shading::ShadeUniforms,
    surface::Surface,
};
use anyhow::{Context, Result};
use log::{debug, info, trace};

/// Represents the status of the orchestrator after processing a frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrameStatus {
    /// No non-zero size has been seen yet; nothing was drawn.
    AwaitingSize,
    /// A batch was drawn and presented; more frames are needed.
    Running,
    /// The image is complete. Nothing was drawn this frame.
    Done,
}

pub struct FrameOrchestrator<S: Surface, P: Presenter> {
    surface: S,
    presenter: P,
    settings: RasterizerSettings,
    rasterizer: Option<SierpinskiRasterizer>,
    frames_drawn: u64,
}

impl<S: Surface, P: Presenter> FrameOrchestrator<S, P> {
    pub fn new(surface: S, presenter: P, settings: RasterizerSettings) -> Self {
        FrameOrchestrator {
            surface,
            presenter,
            settings,
            rasterizer: None,
            frames_drawn: 0,
        }
    }

    /// Handles a drawable-size change.
    ///
    /// Zero sizes are ignored. A size equal to the current one is a no-op.
    /// Any other size discards the current rasterizer and image and starts a
    /// fresh one.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            debug!("Orchestrator: ignoring zero size {}x{}", width, height);
            return Ok(());
        }
        if let Some(current) = &self.rasterizer {
            if current.width() == width && current.height() == height {
                trace!("Orchestrator: size unchanged at {}x{}", width, height);
                return Ok(());
            }
        }

        let config = self.settings.rasterizer_config(width, height);
        let rasterizer = SierpinskiRasterizer::new(config)
            .with_context(|| format!("Failed to create rasterizer for {}x{}", width, height))?;
        self.surface
            .resize(width, height)
            .context("Failed to resize surface")?;

        info!(
            "Orchestrator: new {}x{} image, {} iterations in batches of {}",
            width,
            height,
            rasterizer.iteration_limit(),
            rasterizer.iterations_per_step()
        );
        self.rasterizer = Some(rasterizer);
        self.frames_drawn = 0;
        Ok(())
    }

    /// Processes one display refresh.
    pub fn process_frame(&mut self) -> Result<FrameStatus> {
        let Some(rasterizer) = self.rasterizer.as_mut() else {
            trace!("Orchestrator: no size yet, skipping frame");
            return Ok(FrameStatus::AwaitingSize);
        };
        if rasterizer.is_done() {
            return Ok(FrameStatus::Done);
        }

        let max_count = {
            let mut view = self.surface.lock().context("Failed to lock surface")?;
            rasterizer
                .advance(&mut view)
                .context("Rasterizer rejected the surface")?
        };

        let layout = self
            .surface
            .layout()
            .context("Surface lost its layout after drawing")?;
        self.presenter
            .present(self.surface.contents(), layout, ShadeUniforms::new(max_count))
            .context("Failed to present frame")?;
        self.frames_drawn += 1;

        if rasterizer.is_done() {
            info!(
                "Orchestrator: image complete after {} frames (max count {})",
                self.frames_drawn, max_count
            );
        }
        Ok(FrameStatus::Running)
    }

    pub fn is_done(&self) -> bool {
        self.rasterizer.as_ref().is_some_and(|r| r.is_done())
    }

    pub fn stats(&self) -> Option<RasterizerStats> {
        self.rasterizer.as_ref().map(|r| r.stats())
    }

    pub fn seed(&self) -> Option<u64> {
        self.rasterizer.as_ref().map(|r| r.seed())
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameLayout;
    use crate::surface::HeadlessSurface;

    // --- MockPresenter Definition ---
    #[derive(Default)]
    struct MockPresenter {
        maxima: Vec<u32>,
        totals: Vec<u64>,
        fail: bool,
    }

    impl Presenter for MockPresenter {
        fn present(
            &mut self,
            contents: &[u8],
            layout: FrameLayout,
            uniforms: ShadeUniforms,
        ) -> Result<()> {
            if self.fail {
                anyhow::bail!("mock presenter failure");
            }
            let mut total = 0u64;
            for y in 0..layout.height() {
                for x in 0..layout.width() {
                    total += layout.count_at(contents, x, y).unwrap_or(0) as u64;
                }
            }
            self.maxima.push(uniforms.max_count);
            self.totals.push(total);
            Ok(())
        }
    }

    fn settings(per_step: u32, limit: u32) -> RasterizerSettings {
        RasterizerSettings {
            iterations_per_step: per_step,
            iteration_limit: Some(limit),
            seed: Some(17),
            ..RasterizerSettings::default()
        }
    }

    fn orchestrator(per_step: u32, limit: u32) -> FrameOrchestrator<HeadlessSurface, MockPresenter> {
        FrameOrchestrator::new(
            HeadlessSurface::new(16),
            MockPresenter::default(),
            settings(per_step, limit),
        )
    }

    #[test]
    fn test_awaits_size_before_drawing() {
        let mut orch = orchestrator(10, 100);
        assert_eq!(orch.process_frame().unwrap(), FrameStatus::AwaitingSize);

        orch.resize(0, 0).unwrap();
        assert_eq!(orch.process_frame().unwrap(), FrameStatus::AwaitingSize);
        assert!(orch.presenter().maxima.is_empty());
        assert!(!orch.is_done());
    }

    #[test]
    fn test_runs_to_completion_then_stops_presenting() {
        // Contract: ten frames of ten hits, then Done without further presents.
        let mut orch = orchestrator(10, 100);
        orch.resize(20, 20).unwrap();

        for _ in 0..10 {
            assert_eq!(orch.process_frame().unwrap(), FrameStatus::Running);
        }
        assert!(orch.is_done());
        assert_eq!(orch.process_frame().unwrap(), FrameStatus::Done);
        assert_eq!(orch.process_frame().unwrap(), FrameStatus::Done);

        let presenter = orch.presenter();
        assert_eq!(presenter.maxima.len(), 10);
        assert!(presenter.maxima.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(presenter.totals, (1..=10).map(|i| i * 10).collect::<Vec<u64>>());
        assert_eq!(orch.frames_drawn(), 10);
    }

    #[test]
    fn test_resize_starts_a_fresh_image() {
        let mut orch = orchestrator(50, 1_000);
        orch.resize(32, 32).unwrap();
        orch.process_frame().unwrap();
        orch.process_frame().unwrap();
        assert_eq!(orch.stats().unwrap().iterations_done, 100);

        // Same size: state survives.
        orch.resize(32, 32).unwrap();
        assert_eq!(orch.stats().unwrap().iterations_done, 100);

        orch.resize(16, 24).unwrap();
        let stats = orch.stats().unwrap();
        assert_eq!(stats.iterations_done, 0);
        assert_eq!(stats.running_max, 0);
        assert_eq!(orch.frames_drawn(), 0);
        assert!(orch.surface().contents().iter().all(|&b| b == 0));

        orch.process_frame().unwrap();
        assert_eq!(orch.presenter().totals.last(), Some(&50));
    }

    #[test]
    fn test_invalid_settings_surface_immediately() {
        let mut orch = orchestrator(0, 100);
        assert!(orch.resize(10, 10).is_err());
        assert_eq!(orch.process_frame().unwrap(), FrameStatus::AwaitingSize);
    }

    #[test]
    fn test_presenter_failure_is_reported() {
        let mut orch = orchestrator(10, 100);
        orch.resize(8, 8).unwrap();
        orch.presenter.fail = true;
        assert!(orch.process_frame().is_err());
    }
}
