//! Geometric edits: rotation, flips, cropping and EXIF orientation.

pub mod crop;
pub mod orientation;
pub mod params;
pub mod rotate;
pub mod stage;

pub use orientation::Orientation;
pub use params::{CropSpec, TransformSpec};
