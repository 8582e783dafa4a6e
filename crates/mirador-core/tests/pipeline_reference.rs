//! End-to-end checks of the viewer pipeline through the public API.
//!
//! Run with: `cargo test -p mirador-core`

use mirador_core::grading::{self, GradingParams};
use mirador_core::mirror::{self, MirrorLayout};
use mirador_core::transform::stage;
use mirador_core::zoom::{self, ZoomPolicy, ZoomSettings};
use mirador_core::{
    ChannelFlags, ConfigHandle, CropSpec, Orientation, Raster, Rect, ScrollState, Size,
    TransformSpec, ViewerConfig, ViewerPipeline,
};

/// Deterministic test pattern with distinct values in every pixel.
fn create_test_pattern(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        [(x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x + y) * 7 % 256) as u8, 255]
    })
}

#[test]
fn test_negate_red_scenario() {
    let image = Raster::filled(2, 2, [255, 0, 0, 255]);
    let params = GradingParams {
        negate: ChannelFlags {
            red: true,
            green: false,
            blue: false,
        },
        ..GradingParams::neutral()
    };
    let out = grading::grade(image, &params).unwrap();
    assert!(out.pixels.iter().all(|&p| p == [0, 0, 0, 255]));
}

#[test]
fn test_desaturated_white_stays_white() {
    let image = Raster::filled(1, 1, [255, 255, 255, 255]);
    let params = GradingParams {
        saturation: 0,
        ..GradingParams::neutral()
    };
    let out = grading::grade(image, &params).unwrap();
    assert_eq!(out.pixel(0, 0), [255, 255, 255, 255]);
}

#[test]
fn test_zero_crop_is_pixel_identical() {
    let image = create_test_pattern(17, 9);
    let out = stage::apply(image.clone(), &TransformSpec::default(), &CropSpec::default()).unwrap();
    assert_eq!(out, image);
}

#[test]
fn test_dual_left_half_is_input() {
    let image = create_test_pattern(7, 5);
    let canvas = mirror::composite(image.clone(), MirrorLayout::Dual).unwrap();
    assert_eq!(canvas.size(), Size::new(14, 5));
    for y in 0..5 {
        assert_eq!(&canvas.row(y)[..7], image.row(y));
    }
}

#[test]
fn test_zoom_disable_scales_by_multiplier_only() {
    let settings = ZoomSettings {
        zoom_in: ZoomPolicy::Disable,
        zoom_out: ZoomPolicy::Disable,
        factor: 2.0,
    };
    let out = zoom::fit(Size::new(120, 80), Size::new(1024, 768), &settings, false);
    assert_eq!(out, Size::new(240, 160));
}

#[test]
fn test_zoom_disproportionate_breaks_aspect() {
    let settings = ZoomSettings {
        zoom_in: ZoomPolicy::Disproportionate,
        zoom_out: ZoomPolicy::Disproportionate,
        factor: 1.0,
    };
    let out = zoom::fit(Size::new(300, 300), Size::new(1000, 500), &settings, false);
    assert_eq!(out, Size::new(1000, 500));
}

#[test]
fn test_full_pipeline_order() {
    let mut config = ViewerConfig {
        grading_enabled: true,
        mirror: MirrorLayout::Dual,
        ..ViewerConfig::default()
    };
    config.grading = GradingParams {
        negate: ChannelFlags::ALL,
        ..GradingParams::neutral()
    };

    let mut pipeline = ViewerPipeline::new(ConfigHandle::new(config));
    let gray = Raster::from_fn(6, 4, |x, _| {
        let v = (x * 40) as u8;
        [v, v, v, 255]
    });
    pipeline.load(gray, Orientation::Normal).unwrap();

    // Edits applied after load survive until the next load.
    pipeline.config().update(|c| {
        c.transform.rotation = 90.0;
        c.crop.height = 2;
    });
    let display = pipeline.refresh().unwrap().clone();

    // 6x4 rotated to 4x6, bottom two rows trimmed, then doubled sideways.
    assert_eq!(pipeline.working().unwrap().size(), Size::new(4, 4));
    assert_eq!(display.size(), Size::new(8, 4));

    // Row y of the rotated image is source column y; negated gray is exact.
    let working = pipeline.working().unwrap();
    for y in 0..4 {
        let v = 255 - (y * 40) as u8;
        assert_eq!(working.pixel(0, y), [v, v, v, 255]);
    }
    assert_eq!(display.pixel(7, 2), working.pixel(0, 2));
}

#[test]
fn test_selection_then_fit() {
    let mut pipeline = ViewerPipeline::default();
    pipeline
        .load(create_test_pattern(1600, 1200), Orientation::Normal)
        .unwrap();
    pipeline.commit_selection(Rect::new(100, 100, 1000, 500)).unwrap();
    assert_eq!(pipeline.working().unwrap().size(), Size::new(1000, 500));

    let fit = pipeline
        .fit(Size::new(500, 500), &ScrollState::default())
        .unwrap();
    assert_eq!(fit.size, Size::new(500, 250));
}
