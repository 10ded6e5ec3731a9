//! Error types for imgrotate.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for imgrotate operations.
pub type RotateResult<T> = std::result::Result<T, RotateError>;

/// Coarse classification of a [`RotateError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file could not be opened, created, read or written.
    Io,
    /// The pixmap data does not follow the binary color pixmap layout.
    Format,
    /// The pixmap is well formed but uses a feature this crate does not handle.
    Unsupported,
    /// An operation was invoked in the wrong lifecycle state.
    State,
    /// Caller-supplied dimensions or buffers are invalid.
    Input,
}

/// Errors that can occur when loading, rotating or saving images.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RotateError {
    /// The source file could not be opened.
    #[error("cannot open {}: {reason}", .path.display())]
    FileOpen { path: PathBuf, reason: String },
    /// The destination file could not be created.
    #[error("cannot create {}: {reason}", .path.display())]
    FileCreate { path: PathBuf, reason: String },
    /// Reading from or writing to a stream failed.
    #[error("I/O error: {reason}")]
    Io { reason: String },
    /// The two-byte signature is not a known pixmap magic.
    #[error("wrong image file format: {:?}", String::from_utf8_lossy(.found))]
    BadMagic { found: [u8; 2] },
    /// A header token is missing or not a decimal integer.
    #[error("malformed pixmap header: {reason}")]
    MalformedHeader { reason: &'static str },
    /// The pixel payload ended early.
    #[error("truncated pixel data: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
    /// The file uses a feature that is not supported.
    #[error("{feature} currently not supported")]
    Unsupported { feature: &'static str },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A caller-provided pixel slice is shorter than `width * height`.
    #[error("buffer too small: needed {needed} pixels, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The pixel buffer has already been released.
    #[error("pixel buffer has been released")]
    Released,
    /// A lifecycle operation was called out of order.
    #[error("{operation} called in state {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

impl RotateError {
    /// Returns the coarse error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileOpen { .. } | Self::FileCreate { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::BadMagic { .. } | Self::MalformedHeader { .. } | Self::Truncated { .. } => {
                ErrorKind::Format
            }
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::InvalidDimensions { .. } | Self::BufferTooSmall { .. } => ErrorKind::Input,
            Self::Released | Self::InvalidState { .. } => ErrorKind::State,
        }
    }
}

impl From<std::io::Error> for RotateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
