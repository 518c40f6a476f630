//! The persisted configuration: everything needed to regenerate all scales.
//!
//! Outer layers keep their state however they like; what crosses the
//! boundary into the engine is one immutable [`ScaleConfig`] snapshot.
//! Two identical configs produce bit-identical scales, so the JSON form
//! doubles as the save/load format.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::contrast::ContrastSolver;
use crate::error::ScaleError;
use crate::family::ColorFamily;
use crate::scale::{generate, ColorStep, ContrastTargets, ScaleOptions};

/// Default reference color for contrast: white.
const DEFAULT_REFERENCE: &str = "#ffffff";

fn default_reference() -> String {
    DEFAULT_REFERENCE.to_string()
}

/// Snapshot of every input the engine needs.
///
/// Chroma and the contrast targets are global — shared by all families —
/// while lightness and hue are per-family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Base colors, one scale each.
    pub families: Vec<ColorFamily>,
    /// Chroma applied to every step of every family.
    pub chroma: f64,
    /// Steps per scale (at least 2).
    pub steps: usize,
    /// Sparse per-step contrast constraints.
    #[serde(default)]
    pub targets: ContrastTargets,
    /// Hex color contrast is measured against.
    #[serde(default = "default_reference")]
    pub reference: String,
}

/// One family's generated scale, keyed by the family id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyScale {
    /// The family this scale belongs to.
    pub id: String,
    /// Ordered steps, index 0 first.
    pub steps: Vec<ColorStep>,
}

impl ScaleConfig {
    /// Creates an empty config with the given chroma and step count,
    /// contrast measured against white.
    pub fn new(chroma: f64, steps: usize) -> Self {
        Self {
            families: Vec::new(),
            chroma,
            steps,
            targets: ContrastTargets::new(),
            reference: default_reference(),
        }
    }

    /// Checks the numeric invariants without generating anything.
    pub fn validate(&self) -> Result<(), ScaleError> {
        if self.steps < 2 {
            return Err(ScaleError::InvalidStepCount(self.steps));
        }
        if !self.chroma.is_finite() || self.chroma < 0.0 {
            return Err(ScaleError::InvalidChroma(self.chroma));
        }
        Srgb::from_hex(&self.reference)?;

        let mut seen = HashSet::new();
        for family in &self.families {
            if !family.h.is_finite() || !(0.0..360.0).contains(&family.h) {
                return Err(ScaleError::InvalidHue(family.h));
            }
            if !family.l.is_finite() || !(0.0..=1.0).contains(&family.l) {
                return Err(ScaleError::InvalidConfig(format!(
                    "family '{}' lightness {} outside [0, 1]",
                    family.id, family.l
                )));
            }
            if !seen.insert(family.id.as_str()) {
                return Err(ScaleError::DuplicateFamily(family.id.clone()));
            }
        }
        Ok(())
    }

    /// The per-generation options this config describes.
    pub fn options(&self) -> Result<ScaleOptions, ScaleError> {
        Ok(ScaleOptions {
            chroma: self.chroma,
            steps: self.steps,
            targets: self.targets.clone(),
            reference: Srgb::from_hex(&self.reference)?,
            solver: ContrastSolver::default(),
        })
    }

    /// Generates one scale per family, in family order.
    pub fn generate_all(&self) -> Result<Vec<FamilyScale>, ScaleError> {
        self.validate()?;
        let options = self.options()?;
        self.families
            .iter()
            .map(|family| {
                Ok(FamilyScale {
                    id: family.id.clone(),
                    steps: generate(family, &options)?,
                })
            })
            .collect()
    }
}
