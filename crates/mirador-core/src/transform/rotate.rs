//! Rotation by arbitrary angles.
//!
//! Multiples of 90° are exact index remaps. Every other angle is resampled
//! bilinearly in premultiplied alpha into the rotated bounding box; pixels
//! not covered by the source are transparent.

use glam::{Mat2, Vec2};
use rayon::prelude::*;

use crate::raster::Raster;

/// Angles closer than this to a quarter turn snap to it.
const SNAP_DEGREES: f32 = 1e-4;

/// Rotate `image` clockwise by `degrees` (screen coordinates, y down).
pub fn rotate(image: Raster, degrees: f32) -> Raster {
    let normalized = degrees.rem_euclid(360.0);
    let near = |target: f32| (normalized - target).abs() < SNAP_DEGREES;

    if near(0.0) || near(360.0) {
        image
    } else if near(90.0) {
        rotate90(&image)
    } else if near(180.0) {
        image.mirrored(true, true)
    } else if near(270.0) {
        rotate270(&image)
    } else {
        rotate_bilinear(&image, degrees.to_radians())
    }
}

/// Quarter turn clockwise.
pub fn rotate90(image: &Raster) -> Raster {
    let (w, h) = (image.width, image.height);
    let mut pixels = Vec::with_capacity(image.size().area());
    for y in 0..w {
        for x in 0..h {
            pixels.push(image.pixel(y, h - 1 - x));
        }
    }
    Raster {
        width: h,
        height: w,
        pixels,
        has_alpha: image.has_alpha,
    }
}

/// Quarter turn counter-clockwise.
pub fn rotate270(image: &Raster) -> Raster {
    let (w, h) = (image.width, image.height);
    let mut pixels = Vec::with_capacity(image.size().area());
    for y in 0..w {
        for x in 0..h {
            pixels.push(image.pixel(w - 1 - y, x));
        }
    }
    Raster {
        width: h,
        height: w,
        pixels,
        has_alpha: image.has_alpha,
    }
}

/// Size of the axis-aligned box enclosing `width × height` rotated by
/// `radians`.
pub fn rotated_bounds(width: u32, height: u32, radians: f32) -> (u32, u32) {
    let (sin, cos) = radians.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let (w, h) = (width as f32, height as f32);
    let bw = (w * cos + h * sin - 1e-3).ceil().max(1.0);
    let bh = (w * sin + h * cos - 1e-3).ceil().max(1.0);
    (bw as u32, bh as u32)
}

fn rotate_bilinear(image: &Raster, radians: f32) -> Raster {
    let (out_w, out_h) = rotated_bounds(image.width, image.height, radians);
    let inverse = Mat2::from_angle(-radians);
    let src_center = Vec2::new(image.width as f32, image.height as f32) * 0.5;
    let dst_center = Vec2::new(out_w as f32, out_h as f32) * 0.5;

    let mut pixels = vec![[0u8; 4]; out_w as usize * out_h as usize];
    pixels
        .par_chunks_mut(out_w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let dst = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
                let src = inverse * dst + src_center - Vec2::splat(0.5);
                *px = sample_bilinear(image, src);
            }
        });

    Raster {
        width: out_w,
        height: out_h,
        pixels,
        has_alpha: true,
    }
}

/// Bilinear tap at `pos` (pixel-centre coordinates). Taps outside the image
/// count as transparent black.
fn sample_bilinear(image: &Raster, pos: Vec2) -> [u8; 4] {
    let x0 = pos.x.floor();
    let y0 = pos.y.floor();
    let fx = pos.x - x0;
    let fy = pos.y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut color = [0.0f32; 3];
    let mut alpha = 0.0f32;
    for (tx, ty, weight) in taps {
        if weight <= 0.0
            || tx < 0
            || ty < 0
            || tx >= i64::from(image.width)
            || ty >= i64::from(image.height)
        {
            continue;
        }
        let p = image.pixel(tx as u32, ty as u32);
        let a = f32::from(p[3]) * weight;
        for c in 0..3 {
            color[c] += f32::from(p[c]) * a;
        }
        alpha += a;
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |v: f32| (v / alpha).round().clamp(0.0, 255.0) as u8;
    [
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        alpha.round().clamp(0.0, 255.0) as u8,
    ]
}
