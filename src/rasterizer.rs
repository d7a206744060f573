// src/rasterizer.rs

//! Incremental chaos-game rasterizer for the Sierpiński triangle.
//!
//! The rasterizer is resumable: every call to [`SierpinskiRasterizer::advance`]
//! performs at most `iterations_per_step` moves of the chaos game and deposits
//! one hit per move into the frame it is lent, until the total
//! `iteration_limit` is reached. After that it is done and further calls are
//! no-ops that return the final running maximum.
//!
//! ```text
//!   frame N:  lock surface -> advance(view) -> unlock -> present(max)
//!   frame N+1 ...                                  (until is_done())
//! ```
//!
//! Dimensions are fixed at construction. A new size means a new rasterizer.
//! The warm-up moves are spent at construction too, so no `advance` call
//! ever makes more than `iterations_per_step` moves.

use crate::error::RasterError;
use crate::frame::FrameView;
use crate::geometry::{unit_to_pixel, ChaosMaps};
use glam::Vec2;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Burn-in moves made before the first deposit.
pub const DEFAULT_WARMUP_ITERATIONS: u32 = 20;

/// Largest accepted warm-up. The walk starts on the attractor, so anything
/// longer buys nothing and only delays construction.
pub const MAX_WARMUP_ITERATIONS: u32 = 1024;

/// Everything needed to build a [`SierpinskiRasterizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerConfig {
    pub width: u32,
    pub height: u32,
    /// Maximum hits deposited per `advance` call.
    pub iterations_per_step: u32,
    /// Total hits deposited before the rasterizer reports done.
    pub iteration_limit: u32,
    /// Moves performed once at construction that are neither plotted nor
    /// counted. At most [`MAX_WARMUP_ITERATIONS`].
    pub warmup_iterations: u32,
    /// Seed for vertex selection. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl RasterizerConfig {
    pub fn new(width: u32, height: u32, iterations_per_step: u32, iteration_limit: u32) -> Self {
        Self {
            width,
            height,
            iterations_per_step,
            iteration_limit,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_warmup(mut self, warmup_iterations: u32) -> Self {
        self.warmup_iterations = warmup_iterations;
        self
    }

    fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.iterations_per_step == 0 {
            return Err(RasterError::ZeroIterationsPerStep);
        }
        if self.iteration_limit == 0 {
            return Err(RasterError::ZeroIterationLimit);
        }
        if self.warmup_iterations > MAX_WARMUP_ITERATIONS {
            return Err(RasterError::WarmupTooLong {
                warmup: self.warmup_iterations,
                max: MAX_WARMUP_ITERATIONS,
            });
        }
        Ok(())
    }
}

/// Snapshot of a rasterizer's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerStats {
    pub iterations_done: u32,
    pub iteration_limit: u32,
    pub running_max: u32,
    /// Chaos-game moves made so far, warm-up included.
    pub moves_made: u64,
    /// Moves whose pixel the frame refused. Always zero for a matching frame.
    pub skipped_writes: u64,
}

pub struct SierpinskiRasterizer {
    width: u32,
    height: u32,
    iterations_per_step: u32,
    iteration_limit: u32,
    iterations_done: u32,
    running_max: u32,
    moves_made: u64,
    skipped_writes: u64,
    current_point: Vec2,
    maps: ChaosMaps,
    seed: u64,
    rng: StdRng,
}

impl SierpinskiRasterizer {
    pub fn new(config: RasterizerConfig) -> Result<Self, RasterError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(
            "SierpinskiRasterizer: {}x{} px, {} per step, limit {}, seed {:#018x}",
            config.width,
            config.height,
            config.iterations_per_step,
            config.iteration_limit,
            seed
        );

        let mut rasterizer = Self {
            width: config.width,
            height: config.height,
            iterations_per_step: config.iterations_per_step,
            iteration_limit: config.iteration_limit,
            iterations_done: 0,
            running_max: 0,
            moves_made: 0,
            skipped_writes: 0,
            // The origin is a vertex, so the walk starts on the attractor.
            current_point: Vec2::ZERO,
            maps: ChaosMaps::default(),
            seed,
            rng: StdRng::seed_from_u64(seed),
        };
        for _ in 0..config.warmup_iterations {
            rasterizer.step();
        }
        Ok(rasterizer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn iterations_per_step(&self) -> u32 {
        self.iterations_per_step
    }

    pub fn iteration_limit(&self) -> u32 {
        self.iteration_limit
    }

    pub fn iterations_done(&self) -> u32 {
        self.iterations_done
    }

    pub fn running_max(&self) -> u32 {
        self.running_max
    }

    pub fn current_point(&self) -> Vec2 {
        self.current_point
    }

    pub fn is_done(&self) -> bool {
        self.iterations_done >= self.iteration_limit
    }

    pub fn stats(&self) -> RasterizerStats {
        RasterizerStats {
            iterations_done: self.iterations_done,
            iteration_limit: self.iteration_limit,
            running_max: self.running_max,
            moves_made: self.moves_made,
            skipped_writes: self.skipped_writes,
        }
    }

    /// Replaces the total budget. Lowering it to or below the work already
    /// done finishes the rasterizer.
    pub fn set_iteration_limit(&mut self, iteration_limit: u32) -> Result<(), RasterError> {
        if iteration_limit == 0 {
            return Err(RasterError::ZeroIterationLimit);
        }
        debug!(
            "SierpinskiRasterizer: iteration limit {} -> {}",
            self.iteration_limit, iteration_limit
        );
        self.iteration_limit = iteration_limit;
        Ok(())
    }

    /// Runs one bounded batch of the chaos game into `frame` and returns the
    /// running maximum.
    ///
    /// Once done this returns the last maximum without touching `frame`.
    /// A frame whose dimensions differ from the rasterizer's is rejected
    /// before anything is written.
    pub fn advance(&mut self, frame: &mut FrameView<'_>) -> Result<u32, RasterError> {
        if self.is_done() {
            trace!("SierpinskiRasterizer: done, advance is a no-op");
            return Ok(self.running_max);
        }

        if frame.width() != self.width || frame.height() != self.height {
            return Err(RasterError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }

        let remaining = self.iteration_limit - self.iterations_done;
        let batch = self.iterations_per_step.min(remaining);

        for _ in 0..batch {
            self.step();
            let (x, y) = unit_to_pixel(self.current_point, self.width, self.height);
            self.deposit(frame, x, y);
        }
        self.iterations_done += batch;

        trace!(
            "SierpinskiRasterizer: {} / {} iterations, max {}",
            self.iterations_done,
            self.iteration_limit,
            self.running_max
        );

        Ok(self.running_max)
    }

    #[inline]
    fn step(&mut self) {
        let index = self.rng.gen_range(0..self.maps.len());
        self.current_point = self.maps.apply(index, self.current_point);
        self.moves_made += 1;
    }

    /// Adds one hit at `(x, y)`. A pixel the frame refuses is skipped and
    /// counted, and leaves the running maximum alone.
    fn deposit(&mut self, frame: &mut FrameView<'_>, x: u32, y: u32) {
        match frame.increment(x, y) {
            Some(count) => self.running_max = self.running_max.max(count),
            None => {
                trace!("SierpinskiRasterizer: skipped write at ({}, {})", x, y);
                self.skipped_writes += 1;
            }
        }
    }
}
