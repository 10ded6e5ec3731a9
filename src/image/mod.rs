//! RGB pixel storage.
//!
//! `PixelBuffer` owns a dense row-major grid of [`Pixel`] values addressed by
//! `(x = column, y = row)`. Reads outside the grid yield black instead of an
//! error so resampling code can fetch neighborhoods near the border without
//! bounds checks. Writes outside the grid are ignored.

use crate::engine::geometry::Coord;
use crate::trace::trace_event;
use crate::util::{RotateError, RotateResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub mod ppm;

/// Channel count of RGB pixmaps.
pub const RGB_DEPTH: u32 = 3;
/// Maximum channel value of 8-bit samples.
pub const RGB_MAX_COLOR: u32 = 255;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Fully black pixel, also used for every out-of-range read.
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    /// Fully white pixel.
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    /// Creates a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Owned RGB image with a contiguous pixel buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: usize,
    height: usize,
    depth: u32,
    max_color: u32,
    half_width: f64,
    half_height: f64,
}

impl PixelBuffer {
    /// Loads a binary color pixmap (`P6`) from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> RotateResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| RotateError::FileOpen {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let buffer = ppm::read_ppm(BufReader::new(file))?;

        let path_str = path.display().to_string();
        trace_event!(
            "load",
            path = path_str.as_str(),
            width = buffer.width,
            height = buffer.height,
            max_color = buffer.max_color
        );
        Ok(buffer)
    }

    /// Copies `width * height` pixels from `pixels` into a new buffer.
    ///
    /// Extra trailing pixels are ignored. `depth` is recorded as given.
    pub fn from_pixels(
        width: usize,
        height: usize,
        depth: u32,
        pixels: &[Pixel],
    ) -> RotateResult<Self> {
        let needed = checked_len(width, height)?;
        if pixels.len() < needed {
            return Err(RotateError::BufferTooSmall {
                needed,
                got: pixels.len(),
            });
        }
        Ok(Self::from_parts(
            pixels[..needed].to_vec(),
            width,
            height,
            depth,
            RGB_MAX_COLOR,
        ))
    }

    /// Creates a black canvas of the given size.
    pub fn blank(width: usize, height: usize, depth: u32) -> RotateResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self::from_parts(
            vec![Pixel::BLACK; len],
            width,
            height,
            depth,
            RGB_MAX_COLOR,
        ))
    }

    /// Assembles a buffer whose pixel count has already been validated.
    pub(crate) fn from_parts(
        pixels: Vec<Pixel>,
        width: usize,
        height: usize,
        depth: u32,
        max_color: u32,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
            depth,
            max_color,
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the channel depth (3 for RGB).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the maximum channel value declared for this image.
    pub fn max_color(&self) -> u32 {
        self.max_color
    }

    /// Half the width, the x extent of the centered coordinate system.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Half the height, the y extent of the centered coordinate system.
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Returns the row-major pixel data.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or black when outside the image.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Pixel {
        match self.index(x, y) {
            Some(idx) => self.pixels[idx],
            None => Pixel::BLACK,
        }
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// Returns `false` without writing when the coordinates are outside the
    /// image.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, pixel: Pixel) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = pixel;
                true
            }
            None => false,
        }
    }

    /// Returns true if the centered point lies strictly inside the image.
    pub fn contains_point(&self, point: Coord) -> bool {
        point.x > -self.half_width
            && point.x < self.half_width
            && point.y > -self.half_height
            && point.y < self.half_height
    }

    /// Writes the image as a binary color pixmap.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RotateResult<()> {
        let path = path.as_ref();
        ppm::ensure_writable(self)?;
        let file = File::create(path).map_err(|err| RotateError::FileCreate {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let mut writer = BufWriter::new(file);
        ppm::write_ppm(self, &mut writer)?;
        writer.flush()?;

        let path_str = path.display().to_string();
        trace_event!("save", path = path_str.as_str());
        Ok(())
    }

    /// Frees the pixel storage. Safe to call more than once.
    pub fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
        self.half_width = 0.0;
        self.half_height = 0.0;
    }

    /// Returns true once [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

pub(crate) fn checked_len(width: usize, height: usize) -> RotateResult<usize> {
    if width == 0 || height == 0 {
        return Err(RotateError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(RotateError::InvalidDimensions { width, height })
}
