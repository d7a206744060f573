// src/shading.rs

//! Turns a hit-count buffer into displayable colour.
//!
//! Presentation only needs two things from the rasterizer: the raw count
//! buffer and the running maximum, which travels as a 4-byte uniform
//! ([`ShadeUniforms`]). Each pixel's brightness is its count relative to that
//! maximum, optionally on a log scale so sparse regions stay visible.

use crate::frame::FrameLayout;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(&self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// The per-frame shading parameter: the largest count in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct ShadeUniforms {
    pub max_count: u32,
}

impl ShadeUniforms {
    pub fn new(max_count: u32) -> Self {
        Self { max_count }
    }

    /// Uniform-buffer bytes, native endian, as a GPU would read them.
    pub fn to_bytes(&self) -> [u8; 4] {
        self.max_count.to_ne_bytes()
    }
}

/// Colours used when shading a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Colour of pixels that were never hit.
    pub background: Rgba,
    /// Colour of the most-hit pixel.
    pub foreground: Rgba,
    /// Scale counts logarithmically instead of linearly.
    pub logarithmic: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgba::BLACK,
            foreground: Rgba::WHITE,
            logarithmic: true,
        }
    }
}

impl Palette {
    /// Brightness of `count` relative to `max`, in `[0, 1]`.
    pub fn intensity(&self, count: u32, max: u32) -> f32 {
        if count == 0 || max == 0 {
            return 0.0;
        }
        let t = if self.logarithmic {
            (count as f64).ln_1p() / (max as f64).ln_1p()
        } else {
            count as f64 / max as f64
        };
        t.clamp(0.0, 1.0) as f32
    }

    pub fn shade(&self, count: u32, uniforms: ShadeUniforms) -> Rgba {
        if count == 0 {
            return self.background;
        }
        self.background
            .lerp(self.foreground, self.intensity(count, uniforms.max_count))
    }
}

/// Shades every pixel of a count buffer into an RGBA image.
///
/// Pixels the buffer is too short to hold come out as background.
pub fn shade_frame(
    contents: &[u8],
    layout: FrameLayout,
    uniforms: ShadeUniforms,
    palette: &Palette,
) -> RgbaImage {
    RgbaImage::from_fn(layout.width(), layout.height(), |x, y| {
        let count = layout.count_at(contents, x, y).unwrap_or(0);
        image::Rgba(palette.shade(count, uniforms).to_bytes())
    })
}
