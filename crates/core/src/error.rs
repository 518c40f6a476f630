//! Error types for the tint-engine core.

use thiserror::Error;

/// Errors produced by scale generation and configuration handling.
#[derive(Debug, Error)]
pub enum ScaleError {
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The requested step count cannot be distributed along the lightness curve.
    #[error("invalid step count: {0} (a scale needs at least 2 steps)")]
    InvalidStepCount(usize),

    /// Chroma was negative or not finite.
    #[error("invalid chroma: {0} (expected a finite value >= 0)")]
    InvalidChroma(f64),

    /// A hue angle was outside [0, 360) or not finite.
    #[error("invalid hue: {0} (expected a value in [0, 360))")]
    InvalidHue(f64),

    /// A requested preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Two families in the same configuration share an id.
    #[error("duplicate family id: {0}")]
    DuplicateFamily(String),

    /// A configuration failed validation for a reason not covered above.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
