//! Mathematical helpers for rotation and resampling.

/// Reduces an integer angle in degrees to the range [0, 360).
pub fn normalize_deg(angle_deg: i64) -> u32 {
    angle_deg.rem_euclid(360) as u32
}

/// Returns the angle that undoes a rotation by `angle_deg`.
pub fn reverse_deg(angle_deg: u32) -> u32 {
    (360 - angle_deg % 360) % 360
}

/// Computes sine and cosine for an integer angle in degrees.
///
/// Quarter turns return exact values so that 0/90/180/270 rotations map
/// pixel centers onto pixel centers without drift.
pub fn sin_cos_deg(angle_deg: u32) -> (f64, f64) {
    match angle_deg % 360 {
        0 => (0.0, 1.0),
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        deg => f64::from(deg).to_radians().sin_cos(),
    }
}

/// Rounds `value` half-up to `digits` decimal places.
///
/// Precisions beyond 8 digits return `value` unchanged.
pub fn round_digits(value: f64, digits: u32) -> f64 {
    const SCALE: [f64; 9] = [1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8];
    match SCALE.get(digits as usize) {
        Some(scale) => (value * scale + 0.5).floor() / scale,
        None => value,
    }
}
