//! Display-size calculation under zoom-in and zoom-out policies.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::raster::Size;

/// Rule for sizing an image that is smaller (zoom-in) or larger (zoom-out)
/// than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomPolicy {
    /// Keep the image size, scaled by the multiplier only.
    Disable,
    /// Inscribe into the viewport, preserving aspect ratio.
    #[default]
    FitWidthAndHeight,
    FitWidth,
    FitHeight,
    /// Stretch each axis to the viewport independently.
    Disproportionate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomSettings {
    pub zoom_in: ZoomPolicy,
    pub zoom_out: ZoomPolicy,
    /// Global multiplier applied to every candidate dimension.
    pub factor: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            zoom_in: ZoomPolicy::Disable,
            zoom_out: ZoomPolicy::FitWidthAndHeight,
            factor: 1.0,
        }
    }
}

/// Compute the display size of `image` in `viewport`.
///
/// With `suspended` set the image size is returned unchanged. An empty
/// image is returned as is.
pub fn fit(image: Size, viewport: Size, settings: &ZoomSettings, suspended: bool) -> Size {
    if suspended || image.is_empty() {
        return image;
    }

    let mut size = Dim::from(image);
    let view = Dim::from(viewport);
    let zoom = |v: i64| (v as f32 * settings.factor) as i64;

    match settings.zoom_in {
        ZoomPolicy::Disable => {
            if size.w <= view.w && size.h <= view.h {
                size = size.scale_keep(zoom(size.w), zoom(size.h));
            }
        }
        ZoomPolicy::FitWidthAndHeight => {
            if size.w <= view.w && size.h <= view.h {
                size = size.scale_keep(zoom(view.w), zoom(view.h));
            }
        }
        ZoomPolicy::FitWidth => {
            if size.w <= view.w {
                let h = height_by_width(size, view.w);
                size = size.scale_keep(zoom(view.w), zoom(h));
            }
        }
        ZoomPolicy::FitHeight => {
            if size.h <= view.h {
                let w = width_by_height(size, view.h);
                size = size.scale_keep(zoom(w), zoom(view.h));
            }
        }
        ZoomPolicy::Disproportionate => {
            let w = if size.w <= view.w { view.w } else { size.w };
            let h = if size.h <= view.h { view.h } else { size.h };
            size = Dim { w: zoom(w), h: zoom(h) };
        }
    }
    trace!(?size, "after zoom-in policy");

    match settings.zoom_out {
        ZoomPolicy::Disable => {
            if size.w >= view.w || size.h >= view.h {
                size = size.scale_keep(zoom(size.w), zoom(size.h));
            }
        }
        ZoomPolicy::FitWidthAndHeight => {
            if size.w >= view.w || size.h >= view.h {
                size = size.scale_keep(zoom(view.w), zoom(view.h));
            }
        }
        ZoomPolicy::FitWidth => {
            if size.w >= view.w {
                let h = height_by_width(size, view.w);
                size = size.scale_keep(zoom(view.w), zoom(h));
            }
        }
        ZoomPolicy::FitHeight => {
            if size.h >= view.h {
                let w = width_by_height(size, view.h);
                size = size.scale_keep(zoom(w), zoom(view.h));
            }
        }
        ZoomPolicy::Disproportionate => {
            let w = if size.w >= view.w { view.w } else { size.w };
            let h = if size.h >= view.h { view.h } else { size.h };
            size = Dim { w: zoom(w), h: zoom(h) };
        }
    }
    trace!(?size, "after zoom-out policy");

    size.into()
}

/// Signed working dimensions, so intermediate products cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dim {
    w: i64,
    h: i64,
}

impl Dim {
    /// Largest size with this aspect ratio that fits in `tw × th`.
    fn scale_keep(self, tw: i64, th: i64) -> Self {
        if self.w == 0 || self.h == 0 {
            return Dim { w: tw, h: th };
        }
        let rw = th * self.w / self.h;
        if rw <= tw {
            Dim { w: rw, h: th }
        } else {
            Dim { w: tw, h: tw * self.h / self.w }
        }
    }
}

impl From<Size> for Dim {
    fn from(size: Size) -> Self {
        Dim {
            w: i64::from(size.width),
            h: i64::from(size.height),
        }
    }
}

impl From<Dim> for Size {
    fn from(dim: Dim) -> Self {
        let clamp = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
        Size::new(clamp(dim.w), clamp(dim.h))
    }
}

fn height_by_width(size: Dim, new_width: i64) -> i64 {
    let aspect = size.w as f32 / new_width as f32;
    (size.h as f32 / aspect) as i64
}

fn width_by_height(size: Dim, new_height: i64) -> i64 {
    let aspect = size.h as f32 / new_height as f32;
    (size.w as f32 / aspect) as i64
}

/// Zoom calculator with a per-instance re-entrancy guard.
#[derive(Debug, Default)]
pub struct ZoomFitter {
    busy: AtomicBool,
}

impl ZoomFitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run [`fit`] unless another fit on this instance is in progress, in
    /// which case nothing is computed and `None` is returned.
    pub fn try_fit(
        &self,
        image: Size,
        viewport: Size,
        settings: &ZoomSettings,
        suspended: bool,
    ) -> Option<Size> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        Some(fit(image, viewport, settings, suspended))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
