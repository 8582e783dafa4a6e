//! EXIF orientation tags, applied to a freshly decoded raster.

use serde::{Deserialize, Serialize};

use crate::raster::Raster;
use crate::transform::rotate::{rotate90, rotate270};

/// The eight EXIF orientation values. Reading the tag is the metadata
/// collaborator's job; this only applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Normal,
    MirrorHorizontal,
    Rotate180,
    MirrorVertical,
    /// Rotate 90° clockwise, then mirror horizontally.
    Rotate90MirrorHorizontal,
    Rotate90,
    /// Rotate 90° clockwise, then mirror vertically.
    Rotate90MirrorVertical,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF tag value. Unknown values mean no change.
    pub const fn from_exif(value: u16) -> Self {
        match value {
            2 => Self::MirrorHorizontal,
            3 => Self::Rotate180,
            4 => Self::MirrorVertical,
            5 => Self::Rotate90MirrorHorizontal,
            6 => Self::Rotate90,
            7 => Self::Rotate90MirrorVertical,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    pub fn apply(self, image: Raster) -> Raster {
        match self {
            Self::Normal => image,
            Self::MirrorHorizontal => image.mirrored(true, false),
            Self::Rotate180 => image.mirrored(true, true),
            Self::MirrorVertical => image.mirrored(false, true),
            Self::Rotate90MirrorHorizontal => rotate90(&image).mirrored(true, false),
            Self::Rotate90 => rotate90(&image),
            Self::Rotate90MirrorVertical => rotate90(&image).mirrored(false, true),
            Self::Rotate270 => rotate270(&image),
        }
    }
}
