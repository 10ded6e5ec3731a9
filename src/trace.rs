//! Feature-gated logging for the load, rotate and save pipeline.
//!
//! With the `tracing` feature the macros forward to `tracing`. Without it
//! they expand to nothing beyond evaluating field values.
//!
//! | name           | level | emitted by                               |
//! |----------------|-------|------------------------------------------|
//! | `load`         | info  | `PixelBuffer::load`                      |
//! | `save`         | info  | `PixelBuffer::save`                      |
//! | `target_size`  | info  | canvas sizing before resampling          |
//! | `finish`       | info  | `RotationEngine::finish`                 |
//! | `write_failed` | warn  | `finish` when the output cannot be saved |
//! | `state_error`  | warn  | lifecycle calls made out of order        |
//!
//! Resampling runs inside an info-level `rotate_bilinear` span.

/// Opens an info-level span around the resampling loop.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records a pipeline milestone with its measurements.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

/// Records a rejected lifecycle call or a failed output write.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::warn!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;
pub(crate) use trace_warn;

/// Stand-in for an entered span when the `tracing` feature is off.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
