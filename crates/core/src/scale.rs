//! Scale generation — a base color expanded into an ordered run of steps.
//!
//! Every step shares the family's hue and the global chroma; lightness is
//! the only channel that varies. Unconstrained steps sit on a fixed line
//! from near-white (0.97) down to near-black (0.07); steps with a contrast
//! target get their lightness from [`ContrastSolver`] instead. Generation
//! is a pure function of its inputs — steps carry no identity across calls
//! and are recomputed, never patched in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{oklch_to_css, oklch_to_hex, oklch_to_srgb, OkLch, Srgb};
use crate::contrast::{contrast_ratio, ContrastSolver};
use crate::error::ScaleError;
use crate::family::ColorFamily;

/// Lightness of the first (near-white) step on the default curve.
const CURVE_TOP: f64 = 0.97;
/// Total lightness drop across the default curve.
const CURVE_SPAN: f64 = 0.90;
/// Size of the descending "100".."0" label list.
const LABEL_COUNT: usize = 101;

/// Sparse per-step contrast targets: step index to desired WCAG ratio.
///
/// Only constrained indices are present. An entry that is explicitly `None`
/// means the same as a missing one — no constraint — so a JSON form like
/// `{"0": 4.5, "9": null}` round-trips without changing meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContrastTargets(BTreeMap<usize, Option<f64>>);

impl ContrastTargets {
    /// Creates an empty target map (every step unconstrained).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains `index` to the given ratio.
    pub fn set(&mut self, index: usize, target: f64) {
        self.0.insert(index, Some(target));
    }

    /// Removes any constraint on `index`.
    pub fn clear(&mut self, index: usize) {
        self.0.remove(&index);
    }

    /// The constraint on `index`, if any. Explicit `null` entries read as
    /// unconstrained.
    pub fn target(&self, index: usize) -> Option<f64> {
        self.0.get(&index).copied().flatten()
    }

    /// True when no step is constrained.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }
}

impl FromIterator<(usize, f64)> for ContrastTargets {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(i, t)| (i, Some(t))).collect())
    }
}

/// Per-generation knobs, shared by every family in a call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions {
    /// Chroma applied to every step.
    pub chroma: f64,
    /// Number of steps in the scale (at least 2).
    pub steps: usize,
    /// Sparse contrast constraints.
    pub targets: ContrastTargets,
    /// The color contrast is measured against.
    pub reference: Srgb,
    /// Bisection settings for constrained steps.
    pub solver: ContrastSolver,
}

impl ScaleOptions {
    /// Creates options with the given chroma and step count, no contrast
    /// constraints, and white as the contrast reference.
    pub fn new(chroma: f64, steps: usize) -> Self {
        Self {
            chroma,
            steps,
            targets: ContrastTargets::new(),
            reference: Srgb::WHITE,
            solver: ContrastSolver::default(),
        }
    }
}

/// One generated step of a color scale.
///
/// Lightness is stored rounded to 3 decimals, and the rendered `css`/`hex`
/// strings match the stored value; `contrast` is evaluated at full
/// precision before rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStep {
    /// Position in the scale, 0-based.
    pub index: usize,
    /// Human-readable label ("100", "99", ...).
    pub name: String,
    /// OKLCH lightness, rounded to 3 decimals.
    pub l: f64,
    /// OKLCH chroma (the shared input chroma).
    pub c: f64,
    /// OKLCH hue (the family's hue).
    pub h: f64,
    /// CSS `oklch(...)` string for this step.
    pub css: String,
    /// Copyable hex string for this step.
    pub hex: String,
    /// Achieved WCAG contrast ratio against the reference color.
    pub contrast: f64,
    /// The contrast constraint on this step, if one was set.
    pub target: Option<f64>,
    /// Whether lightness came from the solver rather than the default curve.
    pub contrast_forced: bool,
}

/// Expands a family's base color into an ordered scale.
///
/// Steps without a contrast target sit on the default lightness line;
/// targeted steps get solver-chosen lightness and are flagged
/// `contrast_forced`. A best-effort solve for an unreachable target is
/// still accepted and flagged — compare `contrast` against `target` to
/// detect the near miss. The scale deliberately does not pass through the
/// family's own base lightness; that value only seeds the single-swatch
/// preview (see [`ColorFamily::swatch`]).
///
/// Returns `ScaleError::InvalidStepCount` for fewer than 2 steps, where the
/// default distribution is undefined.
pub fn generate(family: &ColorFamily, options: &ScaleOptions) -> Result<Vec<ColorStep>, ScaleError> {
    if options.steps < 2 {
        return Err(ScaleError::InvalidStepCount(options.steps));
    }

    let mut scale = Vec::with_capacity(options.steps);
    for index in 0..options.steps {
        let target = options.targets.target(index);
        let lightness = match target {
            Some(ratio) => {
                options
                    .solver
                    .solve(options.chroma, family.h, ratio, options.reference)
                    .lightness
            }
            None => default_lightness(index, options.steps),
        };

        // Contrast reports at full precision; everything shown uses the
        // rounded lightness.
        let contrast = contrast_ratio(
            oklch_to_srgb(OkLch::new(lightness, options.chroma, family.h)),
            options.reference,
        );
        let rounded = round_lightness(lightness);
        let color = OkLch::new(rounded, options.chroma, family.h);

        scale.push(ColorStep {
            index,
            name: step_name(index),
            l: rounded,
            c: options.chroma,
            h: family.h,
            css: oklch_to_css(color),
            hex: oklch_to_hex(color, 1.0),
            contrast,
            target,
            contrast_forced: target.is_some(),
        });
    }
    Ok(scale)
}

/// Lightness of step `index` on the default curve: an affine line from
/// 0.97 at the first step down to 0.07 at the last.
fn default_lightness(index: usize, steps: usize) -> f64 {
    let t = index as f64 / (steps - 1) as f64;
    CURVE_TOP - t * CURVE_SPAN
}

/// Rounds a lightness value to 3 decimals for storage and display.
fn round_lightness(l: f64) -> f64 {
    (l * 1000.0).round() / 1000.0
}

/// Label for step `index`: position `i` of the descending "100".."0" list,
/// then the index itself as a string past the end of the list.
fn step_name(index: usize) -> String {
    if index < LABEL_COUNT {
        (LABEL_COUNT - 1 - index).to_string()
    } else {
        index.to_string()
    }
}
