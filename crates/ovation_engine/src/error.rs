//! Error types for ovation_engine
//!
//! The engine performs no I/O; the only failure category is a malformed
//! configuration supplied at construction. Anything escaping `tick()` at
//! runtime is a programming defect and is deliberately not caught here.

use thiserror::Error;

/// Errors raised while validating an engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A `[min, max)` range with min above max
    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: String,
        min: f32,
        max: f32,
    },

    /// A range containing a NaN or infinite bound
    #[error("range for {field} has a non-finite bound")]
    NonFiniteRange { field: String },

    /// A curve with no breakpoints
    #[error("curve has no breakpoints")]
    EmptyCurve,

    /// Breakpoint positions must be strictly ascending
    #[error("curve breakpoints must be strictly ascending: {at} follows {prev}")]
    UnsortedBreakpoints { prev: f32, at: f32 },

    /// Breakpoint position outside the progress domain
    #[error("breakpoint position {at} is outside [0, 1]")]
    BreakpointOutOfRange { at: f32 },

    /// A particle category configured with no colors to pick from
    #[error("color palette for {category} is empty")]
    EmptyPalette { category: String },

    /// A looping waveform with no segments to cycle through
    #[error("waveform for {effect} has no segments")]
    EmptyWaveform { effect: String },

    /// Looping segments must take time, otherwise the cycle degenerates
    #[error("segment duration in {effect} must be positive, got {duration_ms} ms")]
    NonPositiveSegment { effect: String, duration_ms: f32 },
}

/// Result type for ovation_engine construction
pub type Result<T> = std::result::Result<T, ConfigError>;
