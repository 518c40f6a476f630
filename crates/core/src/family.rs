//! Base colors managed by the caller — one family per scale.
//!
//! A family stores only an id plus base lightness and hue; chroma is shared
//! globally and supplied at generation time. The base lightness/hue seed the
//! single-swatch preview shown before a scale is expanded — the generated
//! scale itself follows its own lightness curve.

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_oklch, oklch_to_css, oklch_to_hex, OkLch};
use crate::error::ScaleError;

/// Ready-made base colors: name, base lightness, hue.
const PRESETS: &[(&str, f64, f64)] = &[
    ("indigo", 0.45, 275.0),
    ("crimson", 0.55, 20.0),
    ("teal", 0.70, 185.0),
    ("amber", 0.80, 75.0),
    ("slate", 0.50, 255.0),
];

/// A base color a user manages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFamily {
    /// Caller-chosen identifier, unique within a configuration.
    pub id: String,
    /// Base OKLCH lightness in [0, 1].
    pub l: f64,
    /// Base OKLCH hue in degrees [0, 360).
    pub h: f64,
}

/// Rendered preview of a family's base color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    /// CSS `oklch(...)` string.
    pub css: String,
    /// Copyable hex string.
    pub hex: String,
}

impl ColorFamily {
    /// Creates a family from explicit lightness and hue.
    pub fn new(id: &str, l: f64, h: f64) -> Self {
        Self {
            id: id.to_string(),
            l,
            h,
        }
    }

    /// Seeds a family's lightness and hue from a hex color.
    ///
    /// Chroma is discarded here — it is a global setting, not per-family.
    pub fn from_hex(id: &str, hex: &str) -> Result<Self, ScaleError> {
        let lch = hex_to_oklch(hex)?;
        Ok(Self::new(id, lch.l, lch.h))
    }

    /// Re-seeds lightness and hue from an edited hex string.
    ///
    /// On a parse error the family is left unchanged, so free-form text
    /// input can feed this directly.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), ScaleError> {
        let lch = hex_to_oklch(hex)?;
        self.l = lch.l;
        self.h = lch.h;
        Ok(())
    }

    /// Renders the base color at the given global chroma — the single
    /// swatch shown before the scale is expanded.
    pub fn swatch(&self, chroma: f64) -> Swatch {
        let color = OkLch::new(self.l, chroma, self.h);
        Swatch {
            css: oklch_to_css(color),
            hex: oklch_to_hex(color, 1.0),
        }
    }

    /// Creates a family from a preset name, using the name as the id.
    ///
    /// Returns `ScaleError::UnknownPreset` for unrecognized names.
    pub fn from_preset(name: &str) -> Result<Self, ScaleError> {
        PRESETS
            .iter()
            .find(|(preset, _, _)| *preset == name)
            .map(|&(preset, l, h)| Self::new(preset, l, h))
            .ok_or_else(|| ScaleError::UnknownPreset(name.to_string()))
    }

    /// Names of all built-in presets, in definition order.
    pub fn preset_names() -> Vec<&'static str> {
        PRESETS.iter().map(|(name, _, _)| *name).collect()
    }
}
