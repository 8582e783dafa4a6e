//! Decoding and encoding at the edges of the pipeline.

use std::path::Path;

use image::DynamicImage;
use mirador_core::{PipelineError, Raster};

/// Edge length of the placeholder shown for undecodable inputs.
const PLACEHOLDER_SIZE: u32 = 128;

/// Load an image from disk as an RGBA8 [`Raster`].
///
/// Every pixel format, paletted ones included, is expanded to direct RGBA;
/// the alpha flag records whether the source had an alpha channel.
pub fn load_image(path: &Path) -> Result<Raster, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    let has_alpha = img.color().has_alpha();
    Ok(Raster::from_rgba_image(img.to_rgba8(), has_alpha))
}

/// Encode `raster` in the format implied by the extension of `path`.
///
/// Opaque rasters are written without an alpha channel.
pub fn save_image(raster: &Raster, path: &Path) -> Result<(), ImageLoadError> {
    let rgba = DynamicImage::ImageRgba8(raster.to_rgba_image()?);
    let result = if raster.has_alpha {
        rgba.save(path)
    } else {
        DynamicImage::ImageRgb8(rgba.to_rgb8()).save(path)
    };
    result.map_err(ImageLoadError::Encode)
}

/// Neutral gray checkerboard standing in for an image that failed to
/// decode.
pub fn placeholder() -> Raster {
    Raster::from_fn(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            [96, 96, 96, 255]
        } else {
            [160, 160, 160, 255]
        }
    })
}

/// Errors that can occur at the decode and encode boundary.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mirador-loader-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_png_round_trip_keeps_pixels_and_alpha() {
        let path = temp_path("alpha.png");
        let raster = Raster::from_fn(5, 3, |x, y| [x as u8 * 40, y as u8 * 60, 9, 200]);
        assert!(raster.has_alpha);
        save_image(&raster, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, raster);
    }

    #[test]
    fn test_opaque_raster_saved_without_alpha() {
        let path = temp_path("opaque.png");
        let raster = Raster::filled(4, 4, [10, 20, 30, 255]);
        save_image(&raster, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(!loaded.has_alpha);
        assert_eq!(loaded.pixel(2, 2), [10, 20, 30, 255]);
    }

    #[test]
    fn test_missing_file_fails_to_decode() {
        let err = load_image(&temp_path("missing.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode(_)));
    }

    #[test]
    fn test_placeholder_is_opaque() {
        let img = placeholder();
        assert_eq!(img.width, PLACEHOLDER_SIZE);
        assert!(!img.has_alpha);
        assert!(img.pixels.iter().all(|p| p[3] == 255));
    }
}
