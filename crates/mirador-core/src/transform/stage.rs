//! The geometric stage. Pre-scale, rotation and flips run before the crop.

use image::imageops::{self, FilterType};
use tracing::{debug, instrument};

use crate::error::{PipelineError, Result};
use crate::raster::Raster;
use crate::transform::crop::crop;
use crate::transform::params::{CropSpec, TransformSpec};
use crate::transform::rotate::rotate;

/// Produce the working image from `source`.
#[instrument(skip_all, fields(
    width = source.width,
    height = source.height,
    rotation = transform.rotation,
))]
pub fn apply(source: Raster, transform: &TransformSpec, crop_spec: &CropSpec) -> Result<Raster> {
    let image = reorient(source, transform)?;
    let image = crop(image, crop_spec)?;
    debug!(width = image.width, height = image.height, "geometric stage done");
    Ok(image)
}

/// Everything before the crop: pre-scale, rotation and flips.
pub fn reorient(source: Raster, transform: &TransformSpec) -> Result<Raster> {
    source.validate()?;

    let mut image = match transform.scaled_size {
        Some(size) => resample(source, size.width, size.height)?,
        None => source,
    };

    if transform.has_rotation() {
        image = rotate(image, transform.rotation);
        debug!(width = image.width, height = image.height, "rotated");
    }

    if transform.has_flip() {
        image.mirror(transform.flip_horizontal, transform.flip_vertical);
    }
    Ok(image)
}

/// Lanczos resample to exactly `width × height`.
pub fn resample(image: Raster, width: u32, height: u32) -> Result<Raster> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidScale { width, height });
    }
    if image.width == width && image.height == height {
        return Ok(image);
    }
    let has_alpha = image.has_alpha;
    let buffer = image.to_rgba_image()?;
    let resized = imageops::resize(&buffer, width, height, FilterType::Lanczos3);
    Ok(Raster::from_rgba_image(resized, has_alpha))
}
