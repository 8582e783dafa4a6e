//! Crop extraction.

use crate::error::Result;
use crate::raster::Raster;
use crate::transform::params::CropSpec;

/// Cut `image` down to the rectangle `spec` keeps.
///
/// Percentage insets resolve against `image` as given, so callers pass the
/// already rotated and flipped buffer. A no-op spec hands the buffer back
/// untouched.
pub fn crop(image: Raster, spec: &CropSpec) -> Result<Raster> {
    image.validate()?;
    match spec.resolve(image.width, image.height)? {
        None => Ok(image),
        Some(rect) if rect.size() == image.size() => Ok(image),
        Some(rect) => Ok(image.sub_image(rect)),
    }
}
