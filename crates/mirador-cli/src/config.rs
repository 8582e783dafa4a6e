//! Application configuration for the command-line viewer.

use std::path::PathBuf;

use mirador_core::{PipelineError, Size, ViewerConfig};
use tracing::warn;

use crate::args::{CliArgs, parse_size};

/// Default viewport width in pixels.
const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
/// Default viewport height in pixels.
const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

/// Runtime configuration resolved from the environment and the command
/// line.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Viewer configuration file (`MIRADOR_CONFIG`).
    pub config_path: Option<PathBuf>,
    /// Viewport the display raster is fitted into (`MIRADOR_VIEWPORT`).
    pub viewport: Size,
}

impl Default for AppConfig {
    fn default() -> Self {
        let viewport = std::env::var("MIRADOR_VIEWPORT")
            .ok()
            .and_then(|s| {
                parse_size(&s)
                    .inspect_err(|err| warn!(%err, "ignoring MIRADOR_VIEWPORT"))
                    .ok()
            })
            .unwrap_or(Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT));
        Self {
            config_path: std::env::var_os("MIRADOR_CONFIG").map(PathBuf::from),
            viewport,
        }
    }
}

impl AppConfig {
    /// Environment defaults overridden by explicit flags.
    pub fn resolve(args: &CliArgs) -> Self {
        let mut config = Self::default();
        if let Some(path) = &args.config {
            config.config_path = Some(path.clone());
        }
        if let Some(viewport) = args.viewport {
            config.viewport = viewport;
        }
        config
    }

    /// The viewer configuration file's contents, or defaults when no file
    /// is configured.
    pub fn viewer_config(&self) -> Result<ViewerConfig, PipelineError> {
        match &self.config_path {
            Some(path) => ViewerConfig::load(path),
            None => Ok(ViewerConfig::default()),
        }
    }
}
