//! Viewer configuration and the shared handle UI code edits between runs.
//!
//! The pipeline never reads the handle mid-run: every refresh takes one
//! [`ConfigHandle::snapshot`] and passes the pieces down by reference.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::grading::GradingParams;
use crate::mirror::MirrorLayout;
use crate::transform::{CropSpec, TransformSpec};
use crate::zoom::ZoomSettings;

/// Everything the viewer pipeline reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub transform: TransformSpec,
    pub crop: CropSpec,
    pub grading: GradingParams,
    pub mirror: MirrorLayout,
    pub zoom: ZoomSettings,
    /// Run the grading stage on refresh.
    pub grading_enabled: bool,
    /// Keep rotation, flips and crop when a new image is loaded.
    pub keep_transform: bool,
    /// Apply the EXIF orientation of newly loaded images.
    pub exif_rotation: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            transform: TransformSpec::default(),
            crop: CropSpec::default(),
            grading: GradingParams::default(),
            mirror: MirrorLayout::None,
            zoom: ZoomSettings::default(),
            grading_enabled: false,
            keep_transform: false,
            exif_rotation: true,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), "loaded viewer config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Drop the edits that belong to the previous image.
    ///
    /// The pre-scale always goes; rotation, flips and both kinds of crop
    /// go unless `keep_transform` is set.
    pub fn reset_per_image(&mut self) {
        self.transform.scaled_size = None;
        if !self.keep_transform {
            self.transform.rotation = 0.0;
            self.transform.flip_horizontal = false;
            self.transform.flip_vertical = false;
            self.crop = CropSpec::default();
        }
    }
}

/// Cheaply cloneable, thread-safe handle to the current [`ViewerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle(Arc<RwLock<ViewerConfig>>);

impl ConfigHandle {
    pub fn new(config: ViewerConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> ViewerConfig {
        self.0.read().clone()
    }

    /// Mutate the configuration under the write lock and return what the
    /// closure returned.
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewerConfig) -> R) -> R {
        f(&mut self.0.write())
    }

    pub fn replace(&self, config: ViewerConfig) {
        *self.0.write() = config;
    }
}
