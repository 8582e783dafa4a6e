pub mod fit;
pub mod placement;

pub use fit::{ZoomFitter, ZoomPolicy, ZoomSettings, fit};
pub use placement::{LARGE_CHANGE_MARGIN, Placement, ScrollAxis, ScrollState, place};
