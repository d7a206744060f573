// src/lib.rs

//! Incremental Sierpiński-triangle rasterizer.
//!
//! [`SierpinskiRasterizer`] plays the chaos game into a caller-owned count
//! buffer a bounded batch at a time, so a frame-driven caller can watch the
//! fractal fill in. The rest of the crate is the headless scaffolding such a
//! caller needs: strided frame views, a surface, a presenter, shading and a
//! frame loop.

pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod orchestrator;
pub mod rasterizer;
pub mod shading;
pub mod surface;

pub use error::RasterError;
pub use frame::{FrameLayout, FrameView, BYTES_PER_PIXEL};
pub use orchestrator::{FrameOrchestrator, FrameStatus};
pub use rasterizer::{RasterizerConfig, RasterizerStats, SierpinskiRasterizer};
pub use shading::{Palette, Rgba, ShadeUniforms};
