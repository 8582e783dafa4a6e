//! Color grading: tone tables, HSL conversion and the per-pixel engine.

pub mod engine;
pub mod hsl;
pub mod params;
pub mod tables;

pub use engine::{ChannelSource, GradingEngine, grade};
pub use params::{ChannelFlags, GradingParams};
