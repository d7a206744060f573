//! Headless presenter implementation.

use crate::display::presenter::Presenter;
use crate::frame::FrameLayout;
use crate::shading::ShadeUniforms;
use anyhow::Result;
use log::trace;

/// Presenter that displays nothing and remembers what it was given.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    frames_presented: u64,
    last_uniforms: Option<ShadeUniforms>,
    last_layout: Option<FrameLayout>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_uniforms(&self) -> Option<ShadeUniforms> {
        self.last_uniforms
    }

    pub fn last_layout(&self) -> Option<FrameLayout> {
        self.last_layout
    }
}

impl Presenter for HeadlessPresenter {
    fn present(
        &mut self,
        contents: &[u8],
        layout: FrameLayout,
        uniforms: ShadeUniforms,
    ) -> Result<()> {
        if contents.len() < layout.required_len() {
            anyhow::bail!(
                "Presented buffer of {} bytes is smaller than its {}x{} layout",
                contents.len(),
                layout.width(),
                layout.height()
            );
        }

        self.frames_presented += 1;
        self.last_uniforms = Some(uniforms);
        self.last_layout = Some(layout);
        trace!(
            "HeadlessPresenter: Present frame {} (max {})",
            self.frames_presented,
            uniforms.max_count
        );
        Ok(())
    }
}
