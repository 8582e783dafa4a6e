//! Geometric edit parameters: rotation, flips, pre-scale and crop.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::raster::{Rect, Size};

/// Rotation and mirroring applied before cropping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformSpec {
    /// Clockwise rotation in degrees. 0 = none; any other value resamples.
    pub rotation: f32,
    /// Mirror left-to-right after rotating.
    pub flip_horizontal: bool,
    /// Mirror top-to-bottom after rotating.
    pub flip_vertical: bool,
    /// Resample the source to exactly this size before any other edit,
    /// ignoring aspect ratio.
    pub scaled_size: Option<Size>,
}

impl TransformSpec {
    pub fn has_rotation(&self) -> bool {
        self.rotation != 0.0
    }

    pub fn has_flip(&self) -> bool {
        self.flip_horizontal || self.flip_vertical
    }
}

/// Crop insets. Absolute and percentage insets add up.
///
/// `width` and `height` are trims from the right and bottom edges, not the
/// size of the kept rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropSpec {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub left_percent: u32,
    pub top_percent: u32,
    pub width_percent: u32,
    pub height_percent: u32,
}

impl CropSpec {
    /// True when all eight fields are zero.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_absolute(&self) -> bool {
        self.left != 0 || self.top != 0 || self.width != 0 || self.height != 0
    }

    pub fn has_percent(&self) -> bool {
        self.left_percent != 0
            || self.top_percent != 0
            || self.width_percent != 0
            || self.height_percent != 0
    }

    /// Resolve the kept rectangle against an image of `width × height`.
    ///
    /// Returns `Ok(None)` for a no-op crop and an error when the rectangle
    /// would be empty or inverted.
    pub fn resolve(&self, width: u32, height: u32) -> Result<Option<Rect>> {
        if self.is_noop() {
            return Ok(None);
        }

        let w = i64::from(width);
        let h = i64::from(height);
        let percent = |dim: i64, pct: u32| dim * i64::from(pct) / 100;

        let left = i64::from(self.left) + percent(w, self.left_percent);
        let top = i64::from(self.top) + percent(h, self.top_percent);
        let kept_w = w - i64::from(self.width) - percent(w, self.width_percent) - left;
        let kept_h = h - i64::from(self.height) - percent(h, self.height_percent) - top;

        if kept_w <= 0 || kept_h <= 0 {
            return Err(PipelineError::DegenerateCrop {
                width: kept_w,
                height: kept_h,
                crop_width: width,
                crop_height: height,
            });
        }

        // left + kept_w <= w and both are positive, so the casts are lossless.
        Ok(Some(Rect::new(
            left as u32,
            top as u32,
            kept_w as u32,
            kept_h as u32,
        )))
    }

    /// Absolute insets that keep `selection`, given in the coordinates of
    /// the currently kept rectangle `frame` of an image of size `image`.
    ///
    /// The selection is clipped to the frame first; an empty intersection
    /// is an error.
    pub fn from_selection(selection: Rect, frame: Rect, image: Size) -> Result<Self> {
        let x = selection.x.min(frame.width);
        let y = selection.y.min(frame.height);
        let kept_w = selection.width.min(frame.width - x);
        let kept_h = selection.height.min(frame.height - y);
        if kept_w == 0 || kept_h == 0 {
            return Err(PipelineError::DegenerateCrop {
                width: i64::from(kept_w),
                height: i64::from(kept_h),
                crop_width: frame.width,
                crop_height: frame.height,
            });
        }

        let left = frame.x + x;
        let top = frame.y + y;
        Ok(Self {
            left,
            top,
            width: image.width.saturating_sub(left + kept_w),
            height: image.height.saturating_sub(top + kept_h),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_is_noop() {
        assert!(CropSpec::default().is_noop());
        assert_eq!(CropSpec::default().resolve(10, 10).unwrap(), None);
    }

    #[test]
    fn test_absolute_insets() {
        let crop = CropSpec {
            left: 2,
            top: 1,
            width: 3,
            height: 4,
            ..CropSpec::default()
        };
        assert_eq!(crop.resolve(20, 10).unwrap(), Some(Rect::new(2, 1, 15, 5)));
    }

    #[test]
    fn test_percent_insets_use_current_dimensions() {
        let crop = CropSpec {
            left_percent: 10,
            width_percent: 20,
            top_percent: 50,
            ..CropSpec::default()
        };
        // 200 wide: left 20, right trim 40 → 140; 50 high: top 25 → 25.
        assert_eq!(crop.resolve(200, 50).unwrap(), Some(Rect::new(20, 25, 140, 25)));
    }

    #[test]
    fn test_mixed_insets_accumulate() {
        let crop = CropSpec {
            left: 5,
            left_percent: 10,
            width: 5,
            width_percent: 10,
            ..CropSpec::default()
        };
        // left = 5 + 10, width = 100 - 5 - 10 - 15 = 70
        assert_eq!(crop.resolve(100, 10).unwrap(), Some(Rect::new(15, 0, 70, 10)));
    }

    #[test]
    fn test_percent_truncates() {
        let crop = CropSpec {
            left_percent: 33,
            ..CropSpec::default()
        };
        // 10 · 33 / 100 = 3.3 → 3
        assert_eq!(crop.resolve(10, 4).unwrap(), Some(Rect::new(3, 0, 7, 4)));
    }

    #[test]
    fn test_degenerate_crop_rejected() {
        let crop = CropSpec {
            left: 6,
            width: 4,
            ..CropSpec::default()
        };
        let err = crop.resolve(10, 10).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateCrop { width: 0, .. }));

        let over = CropSpec {
            top_percent: 60,
            height_percent: 60,
            ..CropSpec::default()
        };
        assert!(over.resolve(10, 10).is_err());
    }

    #[test]
    fn test_from_selection_composes_with_frame() {
        let frame = Rect::new(10, 5, 50, 40);
        let crop = CropSpec::from_selection(Rect::new(4, 6, 20, 10), frame, Size::new(100, 80))
            .unwrap();
        assert_eq!(crop.left, 14);
        assert_eq!(crop.top, 11);
        assert_eq!(crop.width, 100 - 34);
        assert_eq!(crop.height, 80 - 21);
        assert!(!crop.has_percent());
        assert_eq!(crop.resolve(100, 80).unwrap(), Some(Rect::new(14, 11, 20, 10)));
    }

    #[test]
    fn test_from_selection_clips_to_frame() {
        let frame = Rect::new(0, 0, 30, 30);
        let crop = CropSpec::from_selection(Rect::new(20, 20, 50, 50), frame, Size::new(30, 30))
            .unwrap();
        assert_eq!(crop.resolve(30, 30).unwrap(), Some(Rect::new(20, 20, 10, 10)));
        assert!(CropSpec::from_selection(Rect::new(40, 0, 5, 5), frame, Size::new(30, 30)).is_err());
    }
}
