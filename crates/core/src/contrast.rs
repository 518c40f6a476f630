//! WCAG contrast math and the lightness solver.
//!
//! Contrast is defined by WCAG 2.x in sRGB relative-luminance space, while
//! the scale engine picks colors in OKLCH lightness. There is no closed form
//! for "the lightness that hits ratio R against this reference", so
//! [`ContrastSolver`] inverts the relationship with a bounded binary search:
//! against a light reference, lowering lightness raises contrast (L=1 is
//! 1:1 against white, L=0 is the maximum), which makes bisection converge.

use crate::color::{oklch_to_srgb, srgb_to_linear, OkLch, Srgb};

/// Computes the relative luminance of a color per WCAG 2.x.
///
/// Linearizes each sRGB channel and applies the standard weighted sum
/// `0.2126*R + 0.7152*G + 0.0722*B`. Returns a value in [0, 1].
pub fn relative_luminance(c: Srgb) -> f64 {
    let lin = srgb_to_linear(c);
    0.2126 * lin.r + 0.7152 * lin.g + 0.0722 * lin.b
}

/// Computes the WCAG 2.x contrast ratio between two colors.
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, always >= 1 regardless of
/// argument order, at most 21 (black on white).
pub fn contrast_ratio(a: Srgb, b: Srgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Bisection settings for solving lightness from a target contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastSolver {
    /// A midpoint is accepted as soon as |achieved - target| drops below this.
    pub tolerance: f64,
    /// Upper bound on bisection steps per solve.
    pub max_iterations: u32,
}

impl Default for ContrastSolver {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            max_iterations: 20,
        }
    }
}

/// Outcome of a lightness solve: the chosen lightness together with the
/// contrast it actually achieves.
///
/// The solver never fails — a target outside the achievable range yields the
/// closest achievable lightness. The residual is kept so callers can tell a
/// converged solve from a best effort and surface near misses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastSolution {
    /// OKLCH lightness in [0, 1].
    pub lightness: f64,
    /// Contrast ratio the chosen lightness actually produces.
    pub achieved: f64,
    /// The ratio that was asked for.
    pub target: f64,
}

impl ContrastSolution {
    /// Absolute gap between the achieved and requested ratio.
    pub fn residual(&self) -> f64 {
        (self.achieved - self.target).abs()
    }

    /// Whether the solve landed within `tolerance` of the target.
    pub fn converged(&self, tolerance: f64) -> bool {
        self.residual() < tolerance
    }
}

impl ContrastSolver {
    /// Finds the OKLCH lightness at which `(L, chroma, hue)` hits `target`
    /// contrast against `reference`.
    ///
    /// Binary search on L in [0, 1]: too little contrast moves the upper
    /// bound down (darker), too much moves the lower bound up. The midpoint
    /// with the smallest residual seen so far is remembered and returned if
    /// no iteration lands within tolerance, so unreachable targets produce
    /// the closest achievable lightness rather than an error.
    pub fn solve(&self, chroma: f64, hue: f64, target: f64, reference: Srgb) -> ContrastSolution {
        let mut min = 0.0_f64;
        let mut max = 1.0_f64;
        let mut best: Option<ContrastSolution> = None;

        for _ in 0..self.max_iterations {
            let mid = (min + max) / 2.0;
            let achieved = contrast_ratio(oklch_to_srgb(OkLch::new(mid, chroma, hue)), reference);
            let candidate = ContrastSolution {
                lightness: mid,
                achieved,
                target,
            };

            if best.map_or(true, |b| candidate.residual() < b.residual()) {
                best = Some(candidate);
            }
            if candidate.residual() < self.tolerance {
                return candidate;
            }

            if achieved < target {
                max = mid; // too little contrast, go darker
            } else {
                min = mid;
            }
        }

        best.unwrap_or_else(|| {
            // max_iterations of 0: report the midpoint of the full range.
            let lightness = 0.5;
            ContrastSolution {
                lightness,
                achieved: contrast_ratio(
                    oklch_to_srgb(OkLch::new(lightness, chroma, hue)),
                    reference,
                ),
                target,
            }
        })
    }
}
