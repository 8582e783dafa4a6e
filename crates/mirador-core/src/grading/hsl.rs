//! Integer-domain RGB ↔ HSL conversion.
//!
//! All three HSL components live in 0–255. The hue wheel is split into six
//! sectors of 42.5 units, so red sits at 0, green at 85 and blue at 170.

/// An HSL triple in the 0–255 domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u8,
    pub saturation: u8,
    pub lightness: u8,
}

/// Round half up, matching the `(int)(x + 0.5)` convention of the curves.
#[inline]
fn round_u8(v: f64) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Convert an 8-bit RGB triple to HSL.
///
/// The max/min search compares `g, b` first when `r > g`, otherwise `r, b`
/// against `g, b`; on ties the hue comes from the first channel (r, then g)
/// equal to the maximum.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let (max, min) = if r > g {
        (r.max(b), g.min(b))
    } else {
        (g.max(b), r.min(b))
    };

    let l = f64::from(max + min) / 2.0;

    if max == min {
        return Hsl {
            hue: 0,
            saturation: 0,
            lightness: round_u8(l),
        };
    }

    let delta = f64::from(max - min);
    let s = if l < 128.0 {
        255.0 * delta / f64::from(max + min)
    } else {
        255.0 * delta / f64::from(511 - max - min)
    };

    let mut h = if r == max {
        f64::from(g - b) / delta
    } else if g == max {
        2.0 + f64::from(b - r) / delta
    } else {
        4.0 + f64::from(r - g) / delta
    };
    h *= 42.5;
    if h < 0.0 {
        h += 255.0;
    } else if h > 255.0 {
        h -= 255.0;
    }

    Hsl {
        hue: round_u8(h),
        saturation: round_u8(s),
        lightness: round_u8(l),
    }
}

/// Convert HSL back to 8-bit RGB.
///
/// `hue` may lie outside 0–255 (after a hue rotation); each channel's ramp
/// folds it back by a single ±255 step, not a full modulo.
pub fn hsl_to_rgb(hue: i32, saturation: u8, lightness: u8) -> [u8; 3] {
    if saturation == 0 {
        return [lightness; 3];
    }

    let h = f64::from(hue);
    let s = f64::from(saturation);
    let l = f64::from(lightness);

    let m2 = if l < 128.0 {
        (l * (255.0 + s)) / 65025.0
    } else {
        (l + s - (l * s) / 255.0) / 255.0
    };
    let m1 = l / 127.5 - m2;

    [
        ramp(m1, m2, h + 85.0),
        ramp(m1, m2, h),
        ramp(m1, m2, h - 85.0),
    ]
}

/// Piecewise-linear HSL ramp with breakpoints at 42.5, 127.5 and 170.
fn ramp(n1: f64, n2: f64, mut hue: f64) -> u8 {
    if hue > 255.0 {
        hue -= 255.0;
    } else if hue < 0.0 {
        hue += 255.0;
    }

    let value = if hue < 42.5 {
        n1 + (n2 - n1) * (hue / 42.5)
    } else if hue < 127.5 {
        n2
    } else if hue < 170.0 {
        n1 + (n2 - n1) * ((170.0 - hue) / 42.5)
    } else {
        n1
    };

    round_u8(value * 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(rgb: [u8; 3]) -> [u8; 3] {
        let hsl = rgb_to_hsl(rgb[0], rgb[1], rgb[2]);
        hsl_to_rgb(i32::from(hsl.hue), hsl.saturation, hsl.lightness)
    }

    fn max_channel_error(a: [u8; 3], b: [u8; 3]) -> i32 {
        (0..3)
            .map(|c| (i32::from(a[c]) - i32::from(b[c])).abs())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(rgb_to_hsl(255, 0, 0).hue, 0);
        assert_eq!(rgb_to_hsl(0, 255, 0).hue, 85);
        assert_eq!(rgb_to_hsl(0, 0, 255).hue, 170);
        let red = rgb_to_hsl(255, 0, 0);
        assert_eq!(red.saturation, 255);
        assert_eq!(red.lightness, 128);
    }

    #[test]
    fn test_white_is_achromatic() {
        let hsl = rgb_to_hsl(255, 255, 255);
        assert_eq!(
            hsl,
            Hsl {
                hue: 0,
                saturation: 0,
                lightness: 255
            }
        );
        assert_eq!(hsl_to_rgb(0, 0, 255), [255, 255, 255]);
    }

    #[test]
    fn test_grays_round_trip_exactly() {
        for v in 0..=255u8 {
            assert_eq!(round_trip([v, v, v]), [v, v, v], "gray {v}");
        }
    }

    #[test]
    fn test_primaries_within_one() {
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255]] {
            let out = round_trip(rgb);
            assert!(max_channel_error(rgb, out) <= 1, "{rgb:?} -> {out:?}");
        }
    }

    #[test]
    fn test_round_trip_bounded_by_hue_quantisation() {
        // One hue unit spans six output levels, so a half-unit rounding
        // error bounds the round trip at a few levels per channel.
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    let out = round_trip([r, g, b]);
                    let err = max_channel_error([r, g, b], out);
                    assert!(err <= 4, "({r}, {g}, {b}) -> {out:?}");
                }
            }
        }
    }

    #[test]
    fn test_hue_fold_is_single_step() {
        // 255 + 85 folds back to 85 on the red ramp, the same as 0 + 85.
        let folded = hsl_to_rgb(255, 255, 128);
        let direct = hsl_to_rgb(0, 255, 128);
        assert_eq!(folded, direct);
    }

    #[test]
    fn test_tie_break_prefers_red_for_hue() {
        // r == g == max: r branch wins, hue = (g - b) / delta · 42.5 = 42.5.
        let hsl = rgb_to_hsl(200, 200, 100);
        assert_eq!(hsl.hue, 43);
    }
}
