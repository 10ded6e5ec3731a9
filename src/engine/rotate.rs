//! Inverse-mapped bilinear rotation.

use crate::engine::filter::{bilinear, Neighborhood};
use crate::engine::geometry::{target_size, Coord, Corners};
use crate::engine::RotateConfig;
use crate::image::{Pixel, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{reverse_deg, round_digits, sin_cos_deg};
use crate::util::RotateResult;

/// Rotates `src` counter-clockwise by `angle_deg` onto a canvas sized to
/// hold the rotated corners.
pub fn rotate_bilinear(
    src: &PixelBuffer,
    angle_deg: u32,
    config: &RotateConfig,
) -> RotateResult<PixelBuffer> {
    let angle_deg = angle_deg % 360;
    let rotated = Corners::of_canvas(src.width(), src.height()).rotated(angle_deg);
    let canvas = target_size(&rotated, config.size_rounding);
    rotate_onto(src, angle_deg, canvas, config)
}

/// Rotates `src` counter-clockwise by `angle_deg` onto a `width x height`
/// canvas centered on the source.
///
/// Each destination pixel center is mapped back into the source with the
/// reverse rotation. Centers that fall outside the source rectangle are
/// black; the rest are blended from their four nearest source pixels.
/// Neighbors that lie outside the source contribute black.
pub fn rotate_onto(
    src: &PixelBuffer,
    angle_deg: u32,
    (width, height): (usize, usize),
    config: &RotateConfig,
) -> RotateResult<PixelBuffer> {
    let angle_deg = angle_deg % 360;
    trace_event!("target_size", width = width, height = height);

    let _span = trace_span!(
        "rotate_bilinear",
        angle_deg = angle_deg,
        src_w = src.width(),
        src_h = src.height(),
        dst_w = width,
        dst_h = height
    )
    .entered();

    let mut dst = PixelBuffer::blank(width, height, src.depth())?;
    let (sin, cos) = sin_cos_deg(reverse_deg(angle_deg));
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;

    for i in 0..height {
        for j in 0..width {
            let cur = Coord::new(-half_w + j as f64 + 0.5, half_h - i as f64 - 0.5);
            let origin = cur.rotated_by(sin, cos);
            if !src.contains_point(origin) {
                continue;
            }
            let color = sample_bilinear(src, origin, config.weight_precision);
            dst.set(j as isize, i as isize, color);
        }
    }

    Ok(dst)
}

/// Samples `src` at a centered coordinate with bilinear filtering.
///
/// The point is converted to pixel-index space (rows grow downward) where
/// integer values land on pixel centers. Fractional weights are rounded to
/// `precision` decimal digits before blending.
pub fn sample_bilinear(src: &PixelBuffer, origin: Coord, precision: u32) -> Pixel {
    let sx = origin.x + src.half_width() - 0.5;
    let sy = src.half_height() - origin.y - 0.5;
    let fx = sx.floor();
    let fy = sy.floor();
    let (x0, y0) = (fx as isize, fy as isize);

    let n = Neighborhood {
        top_left: src.get(x0, y0),
        bottom_left: src.get(x0, y0 + 1),
        top_right: src.get(x0 + 1, y0),
        bottom_right: src.get(x0 + 1, y0 + 1),
    };
    let wx = round_digits(sx - fx, precision);
    let wy = round_digits(sy - fy, precision);
    bilinear(&n, wx, wy)
}

#[cfg(test)]
mod tests {
    use super::{rotate_bilinear, rotate_onto, sample_bilinear};
    use crate::engine::geometry::Coord;
    use crate::engine::RotateConfig;
    use crate::image::{Pixel, PixelBuffer, RGB_DEPTH};

    #[test]
    fn sample_on_pixel_center_returns_pixel() {
        let pixels = [
            Pixel::new(1, 0, 0),
            Pixel::new(2, 0, 0),
            Pixel::new(3, 0, 0),
            Pixel::new(4, 0, 0),
        ];
        let src = PixelBuffer::from_pixels(2, 2, RGB_DEPTH, &pixels).unwrap();
        assert_eq!(sample_bilinear(&src, Coord::new(-0.5, 0.5), 3).r, 1);
        assert_eq!(sample_bilinear(&src, Coord::new(0.5, 0.5), 3).r, 2);
        assert_eq!(sample_bilinear(&src, Coord::new(-0.5, -0.5), 3).r, 3);
        assert_eq!(sample_bilinear(&src, Coord::new(0.5, -0.5), 3).r, 4);
    }

    #[test]
    fn sample_between_centers_blends() {
        let pixels = [Pixel::new(0, 0, 0), Pixel::new(200, 0, 0)];
        let src = PixelBuffer::from_pixels(2, 1, RGB_DEPTH, &pixels).unwrap();
        assert_eq!(sample_bilinear(&src, Coord::new(0.0, 0.0), 3).r, 100);
    }

    #[test]
    fn half_turn_reverses_pixels() {
        let pixels: Vec<Pixel> = (0..6).map(|v| Pixel::new(v, v, v)).collect();
        let src = PixelBuffer::from_pixels(3, 2, RGB_DEPTH, &pixels).unwrap();
        let out = rotate_bilinear(&src, 180, &RotateConfig::default()).unwrap();
        let mut expected = pixels.clone();
        expected.reverse();
        assert_eq!(out.pixels(), expected.as_slice());
    }

    #[test]
    fn explicit_canvas_crops_around_center() {
        let pixels: Vec<Pixel> = (0..9).map(|v| Pixel::new(v, v, v)).collect();
        let src = PixelBuffer::from_pixels(3, 3, RGB_DEPTH, &pixels).unwrap();
        let out = rotate_onto(&src, 0, (1, 1), &RotateConfig::default()).unwrap();
        assert_eq!((out.width(), out.height()), (1, 1));
        assert_eq!(out.get(0, 0), Pixel::new(4, 4, 4));
    }
}
