//! Per-pixel color grading.
//!
//! Every pixel runs through the same fixed chain, independent of its
//! neighbours:
//!
//! ```text
//!   negate ──→ gain ──→ brightness LUT ──→ contrast LUT ──→ RGB→HSL
//!     ──→ hue (replace | rotate) ──→ ×saturation ──→ ×lightness ──→ HSL→RGB
//!     ──→ per-channel select (graded | original)
//! ```
//!
//! Alpha is never touched. Rows are graded in parallel; the two lookup
//! tables are baked once per call and shared read-only.

use rayon::prelude::*;
use tracing::instrument;

use crate::error::Result;
use crate::grading::hsl::{hsl_to_rgb, rgb_to_hsl};
use crate::grading::params::GradingParams;
use crate::grading::tables::ToneTable;
use crate::raster::Raster;

/// Where a channel's final value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSource {
    /// The output of the grading chain.
    Graded,
    /// The pixel's value before grading started.
    Original,
}

impl ChannelSource {
    fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Graded } else { Self::Original }
    }

    #[inline]
    fn select(self, graded: u8, original: u8) -> u8 {
        match self {
            Self::Graded => graded,
            Self::Original => original,
        }
    }
}

/// A grading configuration baked for repeated per-pixel evaluation.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    negate: [bool; 3],
    gain: [i32; 3],
    brightness: ToneTable,
    contrast: ToneTable,
    hue: i32,
    colorize: bool,
    saturation: i32,
    lightness: i32,
    sources: [ChannelSource; 3],
}

impl GradingEngine {
    /// Bake the lookup tables for `params`.
    pub fn new(params: &GradingParams) -> Self {
        let enabled = params.enabled.as_array();
        Self {
            negate: params.negate.as_array(),
            gain: params.gain,
            brightness: ToneTable::brightness(params.brightness),
            contrast: ToneTable::contrast(params.effective_contrast()),
            hue: params.hue,
            colorize: params.colorize,
            saturation: params.saturation,
            lightness: params.lightness,
            sources: enabled.map(ChannelSource::from_enabled),
        }
    }

    /// Grade a single RGBA pixel.
    ///
    /// Configured values are unbounded, so products are formed in `i64`
    /// and the hue offset saturates.
    pub fn grade_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let mut rgb = [0u8; 3];
        for c in 0..3 {
            let v = i64::from(px[c]);
            let v = if self.negate[c] { 255 - v } else { v };
            let v = clamp_channel(v * (100 + i64::from(self.gain[c])) / 100);
            let v = self.brightness.lookup(v);
            rgb[c] = self.contrast.lookup(v);
        }

        let hsl = rgb_to_hsl(rgb[0], rgb[1], rgb[2]);
        let hue = if self.colorize {
            self.hue
        } else {
            i32::from(hsl.hue).saturating_add(self.hue)
        };
        let saturation = clamp_channel(scale_percent(hsl.saturation, self.saturation));
        let lightness = clamp_channel(scale_percent(hsl.lightness, self.lightness));
        let graded = hsl_to_rgb(hue, saturation, lightness);

        [
            self.sources[0].select(graded[0], px[0]),
            self.sources[1].select(graded[1], px[1]),
            self.sources[2].select(graded[2], px[2]),
            px[3],
        ]
    }

    /// Grade every pixel of `image` in place.
    pub fn apply(&self, image: &mut Raster) {
        let width = image.width as usize;
        if width == 0 {
            return;
        }
        image.pixels.par_chunks_mut(width).for_each(|row| {
            for px in row.iter_mut() {
                *px = self.grade_pixel(*px);
            }
        });
    }
}

#[inline]
fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn scale_percent(v: u8, percent: i32) -> i64 {
    i64::from(v) * i64::from(percent) / 100
}

/// Grade `image` with `params`, returning the same buffer.
#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn grade(mut image: Raster, params: &GradingParams) -> Result<Raster> {
    image.validate()?;
    GradingEngine::new(params).apply(&mut image);
    tracing::debug!("grading applied");
    Ok(image)
}
