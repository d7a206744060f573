// src/display/presenter.rs
//! Presenter trait - the minimal interface a display needs to show a frame.

use crate::frame::FrameLayout;
use crate::shading::ShadeUniforms;
use anyhow::Result;

/// Consumes one finished frame.
///
/// `contents` is the surface's count buffer (row padding included) laid out
/// as `layout` describes. `uniforms` carries the running maximum the
/// rasterizer returned for this frame. Implementations must not keep
/// `contents` beyond the call.
pub trait Presenter {
    fn present(
        &mut self,
        contents: &[u8],
        layout: FrameLayout,
        uniforms: ShadeUniforms,
    ) -> Result<()>;
}
