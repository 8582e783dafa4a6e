//! Mirador Core: the raster pipeline behind the image viewer.
//!
//! A decoded [`Raster`] goes through the geometric stage (pre-scale,
//! rotation, flips, crop), optional color grading and an optional mirror
//! layout. The zoom calculator then sizes the result for the viewport.
//! [`ViewerPipeline`] owns the buffers and runs the stages in that order.
//!
//! No windowing or codec dependencies beyond `image`'s buffer type.

pub mod config;
pub mod error;
pub mod grading;
pub mod mirror;
pub mod pipeline;
pub mod raster;
pub mod transform;
pub mod zoom;

// Re-exports for convenience.
pub use config::{ConfigHandle, ViewerConfig};
pub use error::{PipelineError, Result};
pub use grading::{ChannelFlags, GradingParams};
pub use mirror::MirrorLayout;
pub use pipeline::{DisplayFit, ViewerPipeline};
pub use raster::{Raster, Rect, Size};
pub use transform::{CropSpec, Orientation, TransformSpec};
pub use zoom::{Placement, ScrollAxis, ScrollState, ZoomPolicy, ZoomSettings};
