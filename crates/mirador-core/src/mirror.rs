//! Mirror layouts: tiling the working image with axis-mirrored copies.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::raster::Raster;

/// How the working image is tiled onto the display canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorLayout {
    /// Working image passes through unchanged.
    #[default]
    None,
    /// 2×1: image, horizontal mirror.
    Dual,
    /// 3×1: image, horizontal mirror, image.
    Triple,
    /// 2×2: image, horizontal mirror / vertical mirror, both.
    Quad,
    /// 1×2: image over its vertical mirror.
    VerticalDual,
}

impl MirrorLayout {
    /// Canvas size in tiles, `(columns, rows)`.
    pub const fn grid(self) -> (u32, u32) {
        match self {
            Self::None => (1, 1),
            Self::Dual => (2, 1),
            Self::Triple => (3, 1),
            Self::Quad => (2, 2),
            Self::VerticalDual => (1, 2),
        }
    }

    /// `(horizontal, vertical)` mirror flags for every tile, row-major.
    ///
    /// Triple's third tile is mirrored on neither axis, so it repeats the
    /// first tile.
    fn tiles(self) -> &'static [(bool, bool)] {
        match self {
            Self::None => &[(false, false)],
            Self::Dual => &[(false, false), (true, false)],
            Self::Triple => &[(false, false), (true, false), (false, false)],
            Self::Quad => &[(false, false), (true, false), (false, true), (true, true)],
            Self::VerticalDual => &[(false, false), (false, true)],
        }
    }
}

/// Build the mirror canvas for `image`. `MirrorLayout::None` returns the
/// input as is.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn composite(image: Raster, layout: MirrorLayout) -> Result<Raster> {
    image.validate()?;
    if layout == MirrorLayout::None {
        return Ok(image);
    }

    let (columns, rows) = layout.grid();
    let (w, h) = (image.width, image.height);
    let mut canvas = Raster {
        width: w * columns,
        height: h * rows,
        pixels: vec![[0, 0, 0, 0]; (w * columns) as usize * (h * rows) as usize],
        has_alpha: image.has_alpha,
    };

    for (i, &(horizontal, vertical)) in layout.tiles().iter().enumerate() {
        let i = i as u32;
        let (x, y) = ((i % columns) * w, (i / columns) * h);
        if horizontal || vertical {
            canvas.blit(&image.mirrored(horizontal, vertical), x, y);
        } else {
            canvas.blit(&image, x, y);
        }
    }

    debug!(width = canvas.width, height = canvas.height, "mirror canvas built");
    Ok(canvas)
}
