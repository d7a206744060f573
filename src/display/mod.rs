// src/display/mod.rs
//! Presentation side of the frame loop.
//!
//! - Presenter: receives the count buffer and shading uniform each frame
//! - HeadlessPresenter: records frames without a window

pub mod headless;
pub mod presenter;

pub use headless::HeadlessPresenter;
pub use presenter::Presenter;
