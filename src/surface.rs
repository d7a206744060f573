// src/surface.rs

//! Pixel surfaces the rasterizer draws into.
//!
//! A surface owns the count buffer between frames. Drawing goes through
//! [`Surface::lock`], which lends out a [`FrameView`] for one call; the borrow
//! *is* the lock, and dropping the view unlocks. Presenters read the buffer
//! back through [`Surface::contents`].

use crate::frame::{FrameLayout, FrameView};
use anyhow::{Context, Result};
use log::debug;

pub trait Surface {
    /// Reallocates the buffer for a new size. The new buffer is zeroed.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Current layout, or `None` before the first `resize`.
    fn layout(&self) -> Option<FrameLayout>;

    /// Lends the buffer out for one drawing call.
    fn lock(&mut self) -> Result<FrameView<'_>>;

    /// Read-only access to the whole buffer, row padding included.
    fn contents(&self) -> &[u8];
}

/// A surface backed by plain heap memory, with rows padded to an alignment
/// the way GPU-shareable surfaces usually require.
pub struct HeadlessSurface {
    row_alignment: usize,
    layout: Option<FrameLayout>,
    buffer: Box<[u8]>,
}

impl HeadlessSurface {
    pub fn new(row_alignment: usize) -> Self {
        Self {
            row_alignment,
            layout: None,
            buffer: Box::default(),
        }
    }
}

impl Surface for HeadlessSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let layout = FrameLayout::aligned(width, height, self.row_alignment)
            .with_context(|| format!("Invalid surface size {}x{}", width, height))?;
        let len = layout.stride() * height as usize;

        debug!(
            "HeadlessSurface: resize to {}x{} (stride {} bytes, {} bytes total)",
            width,
            height,
            layout.stride(),
            len
        );

        self.buffer = vec![0u8; len].into_boxed_slice();
        self.layout = Some(layout);
        Ok(())
    }

    fn layout(&self) -> Option<FrameLayout> {
        self.layout
    }

    fn lock(&mut self) -> Result<FrameView<'_>> {
        let layout = self
            .layout
            .ok_or_else(|| anyhow::anyhow!("Surface locked before it was sized"))?;
        FrameView::new(&mut self.buffer, layout).context("Surface buffer does not fit its layout")
    }

    fn contents(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_before_resize_fails() {
        let mut surface = HeadlessSurface::new(16);
        assert!(surface.layout().is_none());
        assert!(surface.lock().is_err());
    }

    #[test]
    fn test_resize_allocates_padded_zeroed_buffer() {
        let mut surface = HeadlessSurface::new(16);
        surface.resize(5, 3).unwrap();

        let layout = surface.layout().unwrap();
        assert_eq!(layout.stride(), 32);
        assert_eq!(surface.contents().len(), 96);
        assert!(surface.contents().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_resize_discards_previous_contents() {
        let mut surface = HeadlessSurface::new(4);
        surface.resize(2, 2).unwrap();
        surface.lock().unwrap().increment(1, 1);
        assert_eq!(surface.layout().unwrap().count_at(surface.contents(), 1, 1), Some(1));

        surface.resize(2, 2).unwrap();
        assert_eq!(surface.layout().unwrap().count_at(surface.contents(), 1, 1), Some(0));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut surface = HeadlessSurface::new(16);
        assert!(surface.resize(0, 10).is_err());
        assert!(surface.layout().is_none());
    }
}
