//! In-memory raster representation shared by every pipeline stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PipelineError, Result};

/// A width × height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by this size.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// 8-bit RGBA raster, row-major.
///
/// Stages take a raster by value and hand it onward; a raster is never
/// shared mutably between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, `width * height` entries of `[r, g, b, a]`.
    pub pixels: Vec<[u8; 4]>,
    /// Whether the alpha channel carries information. When false every
    /// alpha value is expected to be 255.
    pub has_alpha: bool,
}

impl Raster {
    /// Wrap an existing pixel buffer, checking its length.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>, has_alpha: bool) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PipelineError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha,
        })
    }

    /// A raster with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
            has_alpha: pixel[3] != u8::MAX,
        }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut has_alpha = false;
        for y in 0..height {
            for x in 0..width {
                let px = f(x, y);
                has_alpha |= px[3] != u8::MAX;
                pixels.push(px);
            }
        }
        Self {
            width,
            height,
            pixels,
            has_alpha,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Error out on a zero-area raster, or on one whose pixel buffer no
    /// longer matches its dimensions after the fields were set directly.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(PipelineError::EmptyRaster);
        }
        let expected = self.size().area();
        if self.pixels.len() != expected {
            return Err(PipelineError::BufferSize {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8; 4] {
        let idx = self.index(x, y);
        &mut self.pixels[idx]
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[[u8; 4]] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Raw interleaved RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy out the sub-rectangle `rect`. The caller guarantees it lies
    /// inside the raster.
    pub(crate) fn sub_image(&self, rect: Rect) -> Self {
        let mut pixels = Vec::with_capacity(rect.size().area());
        for y in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, y);
            pixels.extend_from_slice(&self.pixels[start..start + rect.width as usize]);
        }
        Self {
            width: rect.width,
            height: rect.height,
            pixels,
            has_alpha: self.has_alpha,
        }
    }

    /// Copy `tile` into this raster with its top-left corner at `(x, y)`.
    pub(crate) fn blit(&mut self, tile: &Raster, x: u32, y: u32) {
        let width = tile.width as usize;
        for ty in 0..tile.height {
            let dst = self.index(x, y + ty);
            self.pixels[dst..dst + width].copy_from_slice(tile.row(ty));
        }
    }

    /// Mirror the raster in place.
    pub fn mirror(&mut self, horizontal: bool, vertical: bool) {
        let width = self.width as usize;
        if horizontal {
            for row in self.pixels.chunks_exact_mut(width.max(1)) {
                row.reverse();
            }
        }
        if vertical {
            let height = self.height as usize;
            for y in 0..height / 2 {
                let (top, bottom) = self.pixels.split_at_mut((height - 1 - y) * width);
                top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
            }
        }
    }

    /// Mirrored copy, leaving `self` untouched.
    pub fn mirrored(&self, horizontal: bool, vertical: bool) -> Self {
        let mut out = self.clone();
        out.mirror(horizontal, vertical);
        out
    }

    /// Convert into an `image` crate buffer.
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec()).ok_or(
            PipelineError::BufferSize {
                expected: self.size().area() * 4,
                actual: self.pixels.len() * 4,
            },
        )
    }

    /// Take ownership of an `image` crate buffer.
    pub fn from_rgba_image(image: image::RgbaImage, has_alpha: bool) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .into_raw()
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Self {
            width,
            height,
            pixels,
            has_alpha,
        }
    }
}
