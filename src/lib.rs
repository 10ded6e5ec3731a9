//! imgrotate rotates RGB pixmaps by an arbitrary angle.
//!
//! Destination pixels are inverse-mapped into the source and resampled with
//! a bilinear filter; the output canvas grows to hold the rotated corners.
//! Images are read from and written to the binary color pixmap (`P6`)
//! format.

pub mod engine;
pub mod image;
pub mod lowlevel;
mod trace;
pub mod util;

pub use engine::{
    Coord, Corners, EngineState, RotateConfig, RotationEngine, SizeRounding, StateSummary,
};
pub use image::{Pixel, PixelBuffer};
pub use util::{ErrorKind, RotateError, RotateResult};
