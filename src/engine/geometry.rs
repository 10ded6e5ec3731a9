//! Centered coordinates, corner rotation and output canvas sizing.

use crate::util::math::sin_cos_deg;

/// Extents within this distance below an integer snap up to it before
/// rounding, absorbing trigonometric error on exact sizes.
pub const SIZE_EPSILON: f64 = 1e-6;

/// A point in the centered coordinate system (origin at the image center,
/// x to the right, y upward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates the point counter-clockwise about the origin.
    #[inline]
    pub fn rotated(self, angle_deg: u32) -> Self {
        let (sin, cos) = sin_cos_deg(angle_deg);
        self.rotated_by(sin, cos)
    }

    /// Rotation with precomputed sine and cosine.
    #[inline]
    pub(crate) fn rotated_by(self, sin: f64, cos: f64) -> Self {
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// The four corners of an image canvas in centered coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    pub upper_left: Coord,
    pub upper_right: Coord,
    pub lower_left: Coord,
    pub lower_right: Coord,
}

impl Corners {
    /// Corners of a `width x height` canvas centered on the origin.
    pub fn of_canvas(width: usize, height: usize) -> Self {
        let hw = width as f64 / 2.0;
        let hh = height as f64 / 2.0;
        Self {
            upper_left: Coord::new(-hw, hh),
            upper_right: Coord::new(hw, hh),
            lower_left: Coord::new(-hw, -hh),
            lower_right: Coord::new(hw, -hh),
        }
    }

    /// Rotates all four corners by `angle_deg`.
    pub fn rotated(&self, angle_deg: u32) -> Self {
        let (sin, cos) = sin_cos_deg(angle_deg);
        Self {
            upper_left: self.upper_left.rotated_by(sin, cos),
            upper_right: self.upper_right.rotated_by(sin, cos),
            lower_left: self.lower_left.rotated_by(sin, cos),
            lower_right: self.lower_right.rotated_by(sin, cos),
        }
    }

    pub fn as_array(&self) -> [Coord; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_left,
            self.lower_right,
        ]
    }

    /// Horizontal and vertical spans `(max - min)` of the corners.
    pub fn extent(&self) -> (f64, f64) {
        let pts = self.as_array();
        (
            span(pts.iter().map(|c| c.x)),
            span(pts.iter().map(|c| c.y)),
        )
    }
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    max - min
}

/// How a fractional corner extent becomes an integer canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeRounding {
    /// Truncate toward zero.
    #[default]
    Truncate,
    /// Round half away from zero.
    Round,
    /// Round up.
    Ceil,
}

impl SizeRounding {
    pub fn apply(self, extent: f64) -> usize {
        let extent = extent.max(0.0);
        let value = match self {
            Self::Truncate => (extent + SIZE_EPSILON).trunc(),
            Self::Round => extent.round(),
            Self::Ceil => (extent - SIZE_EPSILON).ceil(),
        };
        value.max(0.0) as usize
    }
}

/// Canvas size that holds `rotated` corners.
pub fn target_size(rotated: &Corners, rounding: SizeRounding) -> (usize, usize) {
    let (dx, dy) = rotated.extent();
    (rounding.apply(dx), rounding.apply(dy))
}
