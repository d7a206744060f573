// src/frame.rs

//! Bounded views over caller-owned pixel memory.
//!
//! The pixel buffer belongs to whoever presents it (a surface, a GPU-shared
//! allocation, a test vector). The rasterizer only ever sees it through a
//! [`FrameView`] borrowed for a single call, so it cannot keep an alias
//! between frames and every write is bounds-checked against the layout.
//!
//! Each pixel is [`BYTES_PER_PIXEL`] bytes holding a native-endian `u32` hit
//! count. Rows may be padded: `stride` is the distance in bytes between the
//! starts of two consecutive rows and must be at least `width * 4`.

use crate::error::RasterError;

pub const BYTES_PER_PIXEL: usize = 4;

/// Dimensions and row stride of a count buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    width: u32,
    height: u32,
    stride: usize,
}

impl FrameLayout {
    pub fn new(width: u32, height: u32, stride: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroDimension { width, height });
        }
        let min = width as usize * BYTES_PER_PIXEL;
        if stride < min {
            return Err(RasterError::StrideTooSmall { stride, min });
        }
        Ok(Self {
            width,
            height,
            stride,
        })
    }

    /// Layout with no row padding.
    pub fn packed(width: u32, height: u32) -> Result<Self, RasterError> {
        Self::new(width, height, width as usize * BYTES_PER_PIXEL)
    }

    /// Layout whose row stride is rounded up to a multiple of `row_alignment`
    /// bytes. An alignment of 0 or 1 means no padding.
    pub fn aligned(width: u32, height: u32, row_alignment: usize) -> Result<Self, RasterError> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let stride = match row_alignment {
            0 | 1 => row_bytes,
            align => row_bytes.div_ceil(align) * align,
        };
        Self::new(width, height, stride)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Smallest buffer, in bytes, that holds every pixel of this layout.
    /// The last row does not need its padding.
    pub fn required_len(&self) -> usize {
        (self.height as usize - 1) * self.stride + self.width as usize * BYTES_PER_PIXEL
    }

    /// Byte offset of pixel `(x, y)`, or `None` if it lies outside the frame.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }

    /// Reads the count at `(x, y)` out of `bytes`.
    pub fn count_at(&self, bytes: &[u8], x: u32, y: u32) -> Option<u32> {
        let offset = self.offset(x, y)?;
        let cell = bytes.get(offset..offset + BYTES_PER_PIXEL)?;
        Some(u32::from_ne_bytes(cell.try_into().ok()?))
    }
}

/// A count buffer lent out for the duration of one call.
#[derive(Debug)]
pub struct FrameView<'a> {
    bytes: &'a mut [u8],
    layout: FrameLayout,
}

impl<'a> FrameView<'a> {
    pub fn new(bytes: &'a mut [u8], layout: FrameLayout) -> Result<Self, RasterError> {
        let required = layout.required_len();
        if bytes.len() < required {
            return Err(RasterError::BufferTooSmall {
                len: bytes.len(),
                required,
            });
        }
        Ok(Self { bytes, layout })
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.layout.count_at(&self.bytes[..], x, y)
    }

    /// Adds one hit at `(x, y)` and returns the new count. Counts saturate at
    /// `u32::MAX`. Returns `None`, leaving memory untouched, if the pixel is
    /// outside the frame.
    #[inline]
    pub fn increment(&mut self, x: u32, y: u32) -> Option<u32> {
        let offset = self.layout.offset(x, y)?;
        let cell = self.bytes.get_mut(offset..offset + BYTES_PER_PIXEL)?;
        let current = u32::from_ne_bytes([cell[0], cell[1], cell[2], cell[3]]);
        let next = current.saturating_add(1);
        cell.copy_from_slice(&next.to_ne_bytes());
        Some(next)
    }
}
