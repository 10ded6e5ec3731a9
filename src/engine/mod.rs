//! Rotation engine: loads a source pixmap, rotates it and writes the result.
//!
//! The engine walks a fixed lifecycle:
//!
//! ```text
//! Uninitialized --init--> Initialized --run--> Done --finish--> Finished
//! ```
//!
//! Calling `init` or `run` out of order returns [`RotateError::InvalidState`]
//! and leaves the engine untouched. `finish` always releases whatever buffers
//! the engine holds and moves to `Finished`, even when there is no output or
//! it cannot be written.

use crate::image::PixelBuffer;
use crate::trace::{trace_event, trace_warn};
use crate::util::math::normalize_deg;
use crate::util::{RotateError, RotateResult};
use std::fmt;
use std::path::{Path, PathBuf};

pub(crate) mod filter;
pub(crate) mod geometry;
pub(crate) mod rotate;

pub use geometry::{Coord, Corners, SizeRounding};

/// Resampling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotateConfig {
    /// Decimal digits kept in the bilinear weights.
    pub weight_precision: u32,
    /// Conversion from rotated corner extents to canvas size.
    pub size_rounding: SizeRounding,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            weight_precision: 3,
            size_rounding: SizeRounding::Truncate,
        }
    }
}

/// Lifecycle position of a [`RotationEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Done,
    Finished,
}

impl EngineState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Done => "done",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Stage {
    Uninitialized,
    Initialized {
        source: PixelBuffer,
    },
    Done {
        source: PixelBuffer,
        output: PixelBuffer,
    },
    Finished,
}

/// Paths, angle and corner geometry fixed by a successful `init`.
struct Job {
    source_path: PathBuf,
    dest_path: PathBuf,
    angle_deg: u32,
    source_size: (usize, usize),
    corners: Corners,
    rotated: Option<Corners>,
}

/// Drives a single load → rotate → save run.
pub struct RotationEngine {
    config: RotateConfig,
    stage: Stage,
    job: Option<Job>,
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationEngine {
    /// Creates an uninitialized engine with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RotateConfig::default(),
            stage: Stage::Uninitialized,
            job: None,
        }
    }

    /// Replaces the resampling configuration.
    pub fn with_config(mut self, config: RotateConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &RotateConfig {
        &self.config
    }

    /// Loads the source image and prepares the corner geometry.
    ///
    /// The angle is reduced to `[0, 360)`. If loading fails the engine stays
    /// uninitialized.
    pub fn init<P, Q>(&mut self, source: P, dest: Q, angle_deg: i64) -> RotateResult<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        if !matches!(self.stage, Stage::Uninitialized) {
            return Err(self.state_error("init"));
        }
        let source_path = source.as_ref().to_path_buf();
        let buffer = PixelBuffer::load(&source_path)?;

        let angle_deg = normalize_deg(angle_deg);
        self.job = Some(Job {
            source_path,
            dest_path: dest.as_ref().to_path_buf(),
            angle_deg,
            source_size: (buffer.width(), buffer.height()),
            corners: Corners::of_canvas(buffer.width(), buffer.height()),
            rotated: None,
        });
        self.stage = Stage::Initialized { source: buffer };
        Ok(())
    }

    /// Rotates the loaded source onto a canvas sized by the rotated corners.
    pub fn run(&mut self) -> RotateResult<()> {
        let (Stage::Initialized { source }, Some(job)) = (&self.stage, &self.job) else {
            return Err(self.state_error("run"));
        };
        let rotated = job.corners.rotated(job.angle_deg);
        let canvas = geometry::target_size(&rotated, self.config.size_rounding);
        let output = rotate::rotate_onto(source, job.angle_deg, canvas, &self.config)?;

        if let Some(job) = self.job.as_mut() {
            job.rotated = Some(rotated);
        }
        self.stage = match std::mem::replace(&mut self.stage, Stage::Finished) {
            Stage::Initialized { source } => Stage::Done { source, output },
            other => other,
        };
        Ok(())
    }

    /// Writes the output and releases both buffers.
    ///
    /// Resources are released whether or not the output exists or could be
    /// written; the first problem encountered is returned afterwards.
    pub fn finish(&mut self) -> RotateResult<()> {
        let result = match &self.stage {
            Stage::Done { output, .. } => match &self.job {
                Some(job) => output.save(&job.dest_path).inspect_err(|err| {
                    let reason = err.to_string();
                    trace_warn!("write_failed", reason = reason.as_str());
                }),
                None => Err(self.state_error("finish")),
            },
            _ => Err(self.state_error("finish")),
        };

        match std::mem::replace(&mut self.stage, Stage::Finished) {
            Stage::Initialized { mut source } => source.release(),
            Stage::Done {
                mut source,
                mut output,
            } => {
                source.release();
                output.release();
            }
            Stage::Uninitialized | Stage::Finished => {}
        }
        trace_event!("finish", written = result.is_ok());
        result
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> EngineState {
        match self.stage {
            Stage::Uninitialized => EngineState::Uninitialized,
            Stage::Initialized { .. } => EngineState::Initialized,
            Stage::Done { .. } => EngineState::Done,
            Stage::Finished => EngineState::Finished,
        }
    }

    /// Returns the normalized angle once initialized.
    pub fn angle(&self) -> Option<u32> {
        self.job.as_ref().map(|job| job.angle_deg)
    }

    /// Returns the source corners in centered coordinates.
    pub fn corners(&self) -> Option<Corners> {
        self.job.as_ref().map(|job| job.corners)
    }

    /// Returns the rotated source corners once `run` has completed.
    pub fn rotated_corners(&self) -> Option<Corners> {
        self.job.as_ref().and_then(|job| job.rotated)
    }

    /// Returns the output size once `run` has completed.
    pub fn target_size(&self) -> Option<(usize, usize)> {
        match &self.stage {
            Stage::Done { output, .. } => Some((output.width(), output.height())),
            _ => None,
        }
    }

    /// Returns the rotated image while it is held by the engine.
    pub fn output(&self) -> Option<&PixelBuffer> {
        match &self.stage {
            Stage::Done { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Summarizes the loaded job, or `None` before a successful `init`.
    pub fn describe_state(&self) -> Option<StateSummary> {
        let job = self.job.as_ref()?;
        let (width, height) = job.source_size;
        Some(StateSummary {
            width,
            height,
            megapixels: (width * height) as f64 / 1_000_000.0,
            angle_deg: job.angle_deg,
            source_path: job.source_path.clone(),
            dest_path: job.dest_path.clone(),
        })
    }

    fn state_error(&self, operation: &'static str) -> RotateError {
        let state = self.state().as_str();
        trace_warn!("state_error", operation = operation, state = state);
        RotateError::InvalidState { operation, state }
    }
}

/// Read-only description of an initialized rotation job.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSummary {
    pub width: usize,
    pub height: usize,
    pub megapixels: f64,
    pub angle_deg: u32,
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
}

impl fmt::Display for StateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "_____ Kernel State _____")?;
        writeln!(f, "Width: {}\t Height: {}", self.width, self.height)?;
        writeln!(
            f,
            "Pixels: {:.2}M\t Angle: {}°",
            self.megapixels, self.angle_deg
        )?;
        write!(
            f,
            "Source file: {}\t Dest. File: {}",
            self.source_path.display(),
            self.dest_path.display()
        )
    }
}
