//! Errors produced by the transform and grading pipeline.

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(
        "crop leaves a {width}x{height} rectangle from a {crop_width}x{crop_height} image"
    )]
    DegenerateCrop {
        /// Resulting rectangle width (non-positive or otherwise invalid).
        width: i64,
        /// Resulting rectangle height.
        height: i64,
        /// Dimensions of the image the crop was resolved against.
        crop_width: u32,
        crop_height: u32,
    },
    #[error("raster has zero width or height")]
    EmptyRaster,
    #[error("pixel buffer holds {actual} entries, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("invalid scale target {width}x{height}")]
    InvalidScale { width: u32, height: u32 },
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("cannot access config file {path}: {source}")]
    ConfigIo {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("no image loaded")]
    NotLoaded,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
