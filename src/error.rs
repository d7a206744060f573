// src/error.rs

//! Precondition failures reported by the rasterizer and its frame views.
//!
//! Every variant indicates a caller bug (bad configuration or a buffer that
//! does not match what was configured). They are surfaced immediately and
//! never retried. Out-of-range pixel coordinates are *not* errors: those are
//! clamped or skipped in place by the rasterizer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("iterations per step must be greater than zero")]
    ZeroIterationsPerStep,
    #[error("iteration limit must be greater than zero")]
    ZeroIterationLimit,
    #[error("frame dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("warm-up of {warmup} moves exceeds the maximum of {max}")]
    WarmupTooLong { warmup: u32, max: u32 },
    #[error("row stride of {stride} bytes is smaller than the {min} bytes one row needs")]
    StrideTooSmall { stride: usize, min: usize },
    #[error("buffer of {len} bytes is smaller than the {required} bytes the layout needs")]
    BufferTooSmall { len: usize, required: usize },
    #[error("frame is {actual_width}x{actual_height} but the rasterizer draws {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}
