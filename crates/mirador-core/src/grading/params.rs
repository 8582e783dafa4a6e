//! Color grading parameters.
//!
//! Values use the viewer's internal units: hue in a 0–255 wheel,
//! saturation/lightness/gain as percentages, brightness and contrast in
//! hundredths (100 brightness = ratio 1.0, contrast is fed to `tan` in
//! radians after dividing by 100).

use serde::{Deserialize, Serialize};

/// Contrast at which `tan(contrast / 100) == 1`, i.e. the identity curve.
pub const NEUTRAL_CONTRAST: f32 = 100.0 * std::f32::consts::FRAC_PI_4;

/// Start-up contrast of the viewer. Close to, but not exactly, neutral.
pub const DEFAULT_CONTRAST: f32 = 78.0;

/// Upper bound for configured contrast. `tan` diverges at 157.08.
pub const MAX_CONTRAST: f32 = 155.0;

/// Brightness giving a gamma ratio of 1.0.
pub const NEUTRAL_BRIGHTNESS: f32 = 100.0;

/// A red/green/blue triple of switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFlags {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl ChannelFlags {
    pub const ALL: Self = Self::splat(true);
    pub const NONE: Self = Self::splat(false);

    pub const fn splat(value: bool) -> Self {
        Self {
            red: value,
            green: value,
            blue: value,
        }
    }

    /// Flags in `[r, g, b]` order.
    pub const fn as_array(&self) -> [bool; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Everything the grading engine reads. The engine never mutates this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradingParams {
    /// Hue offset (or absolute hue when `colorize` is set), 0–255 wheel.
    pub hue: i32,
    /// Saturation scale in percent. 100 = unchanged.
    pub saturation: i32,
    /// Lightness scale in percent. 100 = unchanged.
    pub lightness: i32,
    /// Contrast in hundredths of a radian. See [`NEUTRAL_CONTRAST`].
    pub contrast: f32,
    /// Brightness in percent of the gamma ratio. 100 = unchanged.
    pub brightness: f32,
    /// Replace the hue instead of rotating it.
    pub colorize: bool,
    /// Channels to invert before any other step.
    pub negate: ChannelFlags,
    /// Channels that receive the graded value. Disabled channels keep the
    /// pre-grading value.
    pub enabled: ChannelFlags,
    /// Per-channel gain deltas in percent, `[r, g, b]`.
    pub gain: [i32; 3],
}

impl GradingParams {
    /// Parameters under which grading leaves every pixel unchanged, up to
    /// the precision of the HSL round trip.
    pub fn neutral() -> Self {
        Self {
            contrast: NEUTRAL_CONTRAST,
            ..Self::default()
        }
    }

    /// Contrast clamped into the range the engine is defined on.
    pub fn effective_contrast(&self) -> f32 {
        self.contrast.clamp(0.0, MAX_CONTRAST)
    }
}

impl Default for GradingParams {
    /// The viewer's start-up settings.
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: 100,
            lightness: 100,
            contrast: DEFAULT_CONTRAST,
            brightness: NEUTRAL_BRIGHTNESS,
            colorize: false,
            negate: ChannelFlags::NONE,
            enabled: ChannelFlags::ALL,
            gain: [0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_startup_values() {
        let p = GradingParams::default();
        assert_eq!(p.saturation, 100);
        assert_eq!(p.lightness, 100);
        assert_eq!(p.contrast, 78.0);
        assert_eq!(p.brightness, 100.0);
        assert_eq!(p.enabled, ChannelFlags::ALL);
        assert_eq!(p.negate, ChannelFlags::NONE);
    }

    #[test]
    fn test_neutral_contrast_has_unit_tangent() {
        assert_eq!((NEUTRAL_CONTRAST / 100.0).tan(), 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let p: GradingParams = serde_json::from_str(r#"{"hue": 40, "colorize": true}"#).unwrap();
        assert_eq!(p.hue, 40);
        assert!(p.colorize);
        assert_eq!(p.saturation, 100);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: Result<GradingParams, _> = serde_json::from_str(r#"{"gamma": 2}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_effective_contrast_is_bounded() {
        let p = GradingParams {
            contrast: 400.0,
            ..GradingParams::default()
        };
        assert_eq!(p.effective_contrast(), MAX_CONTRAST);
    }
}
