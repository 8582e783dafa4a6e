//! Scroll offset carried across a display resize.

use serde::Serialize;

use crate::raster::Size;

/// Below viewport + this many pixels on either axis, a resized image is
/// re-centred instead of keeping its relative scroll offset.
pub const LARGE_CHANGE_MARGIN: u32 = 100;

/// One scroll bar: current value and its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollAxis {
    pub value: i32,
    pub maximum: i32,
}

impl ScrollAxis {
    pub const fn new(value: i32, maximum: i32) -> Self {
        Self { value, maximum }
    }

    /// Relative position in `0.0..=1.0`; zero when not scrolled.
    pub fn fraction(self) -> f32 {
        if self.value <= 0 || self.maximum <= 0 {
            0.0
        } else {
            self.value as f32 / self.maximum as f32
        }
    }
}

/// Scroll state of the viewport before a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollState {
    pub horizontal: ScrollAxis,
    pub vertical: ScrollAxis,
}

impl ScrollState {
    pub fn at_origin(&self) -> bool {
        self.horizontal.value <= 0 && self.vertical.value <= 0
    }
}

/// Where the viewport should scroll to after the image was resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Scroll so the image centre is in the middle of the viewport.
    Center { x: u32, y: u32 },
    /// Keep the previous relative offset.
    Restore { x: u32, y: u32 },
}

impl Placement {
    /// Scroll values `(x, y)`.
    pub fn offset(self) -> (u32, u32) {
        match self {
            Self::Center { x, y } | Self::Restore { x, y } => (x, y),
        }
    }
}

/// Decide the scroll position for an image newly sized to `size`.
pub fn place(size: Size, viewport: Size, previous: &ScrollState) -> Placement {
    let max_x = size.width.saturating_sub(viewport.width);
    let max_y = size.height.saturating_sub(viewport.height);

    let small = u64::from(size.width) < u64::from(viewport.width) + u64::from(LARGE_CHANGE_MARGIN)
        || u64::from(size.height) < u64::from(viewport.height) + u64::from(LARGE_CHANGE_MARGIN);

    if previous.at_origin() || small {
        return Placement::Center {
            x: max_x / 2,
            y: max_y / 2,
        };
    }

    let restore = |max: u32, fraction: f32| (max as f32 * fraction) as u32;
    Placement::Restore {
        x: restore(max_x, previous.horizontal.fraction()),
        y: restore(max_y, previous.vertical.fraction()),
    }
}
