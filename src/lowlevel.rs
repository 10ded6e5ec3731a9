//! Low-level building blocks for custom rotation pipelines.
//!
//! These expose the resampling kernel, the blend filter, canvas sizing and
//! the pixmap codec used by [`RotationEngine`](crate::RotationEngine). Most
//! users should prefer the engine.

pub use crate::engine::filter::{bilinear, interpolate_linear, Neighborhood};
pub use crate::engine::geometry::{target_size, SIZE_EPSILON};
pub use crate::engine::rotate::{rotate_bilinear, rotate_onto, sample_bilinear};
pub use crate::image::ppm::{read_header, read_ppm, write_ppm, PpmHeader};
pub use crate::util::math::{normalize_deg, reverse_deg, round_digits, sin_cos_deg};
