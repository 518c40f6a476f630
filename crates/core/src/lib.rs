#![deny(unsafe_code)]
//! Core types for the tint-engine color-scale system.
//!
//! Provides the OKLCH color adapter (`Srgb`, `OkLch`, hex and CSS
//! rendering), WCAG contrast math with the lightness `ContrastSolver`,
//! `ColorFamily` base colors, the scale generator (`generate`, `ColorStep`),
//! and the serializable `ScaleConfig` boundary.

pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod family;
pub mod scale;

pub use color::{hex_to_oklch, oklch_to_css, oklch_to_hex, LinearRgb, OkLch, Srgb};
pub use config::{FamilyScale, ScaleConfig};
pub use contrast::{contrast_ratio, ContrastSolution, ContrastSolver};
pub use error::ScaleError;
pub use family::{ColorFamily, Swatch};
pub use scale::{generate, ColorStep, ContrastTargets, ScaleOptions};
