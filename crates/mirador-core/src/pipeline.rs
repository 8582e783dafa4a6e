//! The viewer pipeline: owns the three raster buffers and runs the stages
//! in order on every load or edit.

use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigHandle, ViewerConfig};
use crate::error::{PipelineError, Result};
use crate::grading;
use crate::mirror::{self, MirrorLayout};
use crate::raster::{Raster, Rect, Size};
use crate::transform::crop::crop;
use crate::transform::stage::reorient;
use crate::transform::{CropSpec, Orientation};
use crate::zoom::{Placement, ScrollState, ZoomFitter, place};

/// Result of fitting the display raster into a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFit {
    pub size: Size,
    pub placement: Placement,
}

/// Load → geometric stage → grading → mirror, with the zoom fit on top.
#[derive(Debug, Default)]
pub struct ViewerPipeline {
    config: ConfigHandle,
    fitter: ZoomFitter,
    original: Option<Raster>,
    working: Option<Raster>,
    composited: Option<Raster>,
    /// Kept rectangle of the last crop, in pre-crop coordinates.
    frame: Option<Rect>,
    /// Size of the image the last crop was resolved against.
    frame_source: Size,
    resize_suspended: bool,
}

impl ViewerPipeline {
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn original(&self) -> Option<&Raster> {
        self.original.as_ref()
    }

    /// Geometric and grading output, before mirroring.
    pub fn working(&self) -> Option<&Raster> {
        self.working.as_ref()
    }

    /// The raster handed to the renderer: the mirror canvas when a layout
    /// is active, the working image otherwise.
    pub fn display(&self) -> Option<&Raster> {
        self.composited.as_ref().or(self.working.as_ref())
    }

    /// Take a freshly decoded image.
    ///
    /// Resets the previous image's edits, applies `orientation` when EXIF
    /// rotation is on, and runs a full refresh.
    #[instrument(skip(self, image), fields(width = image.width, height = image.height))]
    pub fn load(&mut self, image: Raster, orientation: Orientation) -> Result<&Raster> {
        image.validate()?;
        let exif_rotation = self.config.update(|config| {
            config.reset_per_image();
            config.exif_rotation
        });

        let image = if exif_rotation {
            orientation.apply(image)
        } else {
            image
        };
        info!(width = image.width, height = image.height, ?orientation, "image loaded");

        self.original = Some(image);
        self.working = None;
        self.composited = None;
        self.frame = None;
        self.refresh()
    }

    /// Rebuild the working and display rasters from the original using a
    /// fresh configuration snapshot.
    ///
    /// On error the previous buffers are left as they were.
    #[instrument(skip(self))]
    pub fn refresh(&mut self) -> Result<&Raster> {
        let original = self.original.as_ref().ok_or(PipelineError::NotLoaded)?;
        let config = self.config.snapshot();

        let reoriented = reorient(original.clone(), &config.transform)?;
        let frame_source = reoriented.size();
        let frame = config
            .crop
            .resolve(frame_source.width, frame_source.height)?
            .unwrap_or_else(|| Rect::new(0, 0, frame_source.width, frame_source.height));
        let mut working = crop(reoriented, &config.crop)?;

        if config.grading_enabled || config.keep_transform {
            working = grading::grade(working, &config.grading)?;
        }

        let composited = match config.mirror {
            MirrorLayout::None => None,
            layout => Some(mirror::composite(working.clone(), layout)?),
        };

        debug!(
            width = working.width,
            height = working.height,
            mirror = ?config.mirror,
            "pipeline refreshed"
        );
        self.frame = Some(frame);
        self.frame_source = frame_source;
        self.working = Some(working);
        self.composited = composited;
        self.display().ok_or(PipelineError::NotLoaded)
    }

    /// Suspend or resume zoom fitting, e.g. while a drag gesture is active.
    pub fn set_resize_suspended(&mut self, suspended: bool) {
        self.resize_suspended = suspended;
    }

    /// Display size and scroll placement of the current display raster.
    ///
    /// `None` when nothing is loaded or a fit is already running.
    pub fn fit(&self, viewport: Size, scroll: &ScrollState) -> Option<DisplayFit> {
        let display = self.display()?;
        if display.is_empty() {
            return None;
        }
        let zoom = self.config.snapshot().zoom;
        let size = self
            .fitter
            .try_fit(display.size(), viewport, &zoom, self.resize_suspended)?;
        let placement = place(size, viewport, scroll);
        debug!(%size, %viewport, ?placement, "display fitted");
        Some(DisplayFit { size, placement })
    }

    /// Crop to `selection`, given in working-image coordinates, and
    /// refresh.
    ///
    /// Replaces both crop kinds with absolute insets. An empty selection
    /// leaves the configuration and buffers untouched.
    #[instrument(skip(self))]
    pub fn commit_selection(&mut self, selection: Rect) -> Result<&Raster> {
        let frame = self.frame.ok_or(PipelineError::NotLoaded)?;
        let crop = CropSpec::from_selection(selection, frame, self.frame_source).inspect_err(
            |err| warn!(%err, "selection rejected"),
        )?;
        self.config.update(|config| config.crop = crop);
        self.refresh()
    }

    /// Drop all buffers.
    pub fn clear(&mut self) {
        self.original = None;
        self.working = None;
        self.composited = None;
        self.frame = None;
        self.frame_source = Size::default();
    }

    /// Replace the whole configuration and refresh if an image is loaded.
    pub fn apply_config(&mut self, config: ViewerConfig) -> Result<Option<&Raster>> {
        self.config.replace(config);
        if self.original.is_none() {
            return Ok(None);
        }
        self.refresh().map(Some)
    }
}
