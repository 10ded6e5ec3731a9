//! Color blending for bilinear resampling.
//!
//! Channels are combined as `a * (1 - w) + b * w` (computed as
//! `a + (b - a) * w`) and truncated toward zero when converted back to 8 bits.

use crate::image::Pixel;

/// The 2x2 neighborhood around a sample point in pixel-index space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub top_left: Pixel,
    pub bottom_left: Pixel,
    pub top_right: Pixel,
    pub bottom_right: Pixel,
}

#[inline]
fn lerp_channel(a: u8, b: u8, weight: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    let value = a + (b - a) * weight;
    value.clamp(0.0, 255.0) as u8
}

/// Linearly interpolates two colors; `weight = 0` yields `a`, `1` yields `b`.
#[inline]
pub fn interpolate_linear(a: Pixel, b: Pixel, weight: f64) -> Pixel {
    Pixel {
        r: lerp_channel(a.r, b.r, weight),
        g: lerp_channel(a.g, b.g, weight),
        b: lerp_channel(a.b, b.b, weight),
    }
}

/// Blends a neighborhood horizontally by `wx`, then vertically by `wy`.
#[inline]
pub fn bilinear(n: &Neighborhood, wx: f64, wy: f64) -> Pixel {
    let upper = interpolate_linear(n.top_left, n.top_right, wx);
    let lower = interpolate_linear(n.bottom_left, n.bottom_right, wx);
    interpolate_linear(upper, lower, wy)
}
