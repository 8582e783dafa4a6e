//! 256-entry tone lookup tables for brightness and contrast.
//!
//! Both curves are channel independent, so each grading call bakes them
//! once and every worker reads them without synchronisation.

/// A per-channel 8-bit lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneTable {
    entries: [u8; 256],
}

impl ToneTable {
    /// The identity table.
    pub fn identity() -> Self {
        let mut entries = [0u8; 256];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = i as u8;
        }
        Self { entries }
    }

    /// Gamma curve: `255 · (i / 255)^(1 / ratio)`, rounded half up.
    ///
    /// `brightness` is the configured value; the ratio is `brightness / 100`.
    /// A non-positive ratio maps everything but 255 to black.
    pub fn brightness(brightness: f32) -> Self {
        let ratio = f64::from(brightness) / 100.0;
        let mut entries = [0u8; 256];
        for (i, e) in entries.iter_mut().enumerate() {
            let v = if ratio > 0.0 {
                255.0 * (i as f64 / 255.0).powf(1.0 / ratio) + 0.5
            } else if i == 255 {
                255.0
            } else {
                0.0
            };
            *e = clamp_u8(v.trunc());
        }
        Self { entries }
    }

    /// Tangent contrast curve centred on 128.
    ///
    /// ```text
    /// t = tan(contrast / 100)
    /// ⌊128 − 128t⌋ < i < ⌊128 + 128t⌋  →  ⌊(i − 128) / t + 128⌋
    /// i ≥ ⌊128 + 128t⌋                 →  255
    /// otherwise                        →  0
    /// ```
    ///
    /// Bounds and entries truncate toward zero. Evaluated in `f32`, where
    /// `tan(NEUTRAL_CONTRAST / 100)` is exactly 1 and the table is the
    /// identity. `contrast` must stay below `MAX_CONTRAST` so that `t` is
    /// finite.
    pub fn contrast(contrast: f32) -> Self {
        let t = (contrast / 100.0).tan();
        let lower = (128.0 - 128.0 * t) as i32;
        let upper = (128.0 + 128.0 * t) as i32;
        let mut entries = [0u8; 256];
        for (i, e) in (0i32..).zip(entries.iter_mut()) {
            *e = if i > lower && i < upper {
                clamp_u8(f64::from(((i - 128) as f32 / t + 128.0).trunc()))
            } else if i >= upper {
                u8::MAX
            } else {
                0
            };
        }
        Self { entries }
    }

    #[inline]
    pub fn lookup(&self, value: u8) -> u8 {
        self.entries[value as usize]
    }

    pub fn is_identity(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, &e)| i == e as usize)
    }
}

#[inline]
fn clamp_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
