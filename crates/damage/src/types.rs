use std::fmt;

use serde::{Deserialize, Serialize};

use qrlab_config::EcLevel;

use crate::brush::BrushSize;
use crate::constants::{LIKELY_SCANNABLE_FACTOR, MAY_SCAN_FACTOR};

/// A simulated circular defect on the rendered symbol
///
/// Marks are compared on all three fields, so the same point painted with
/// two different brushes yields two marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageMark {
    /// X in canvas pixels
    pub x: u32,
    /// Y in canvas pixels
    pub y: u32,
    /// Brush used when the mark was made; fixes the mark's radius
    pub brush: BrushSize,
}

impl DamageMark {
    pub fn new(x: u32, y: u32, brush: BrushSize) -> Self {
        Self { x, y, brush }
    }

    /// Accounting radius in pixels
    pub fn radius(&self) -> f64 {
        self.brush.mark_radius()
    }

    /// Accounting area in square pixels
    pub fn area(&self) -> f64 {
        self.brush.mark_area()
    }
}

/// Result of adding a single mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkAddedResult {
    /// False when an identical mark already existed
    pub applied: bool,
}

/// Result of a random damage pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RandomDamageReport {
    /// Spots the target percentage called for
    pub requested: u64,
    /// Spots that were new; collisions are skipped, not retried
    pub added: u64,
}

/// Coarse scannability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    LikelyScannable,
    MayScan,
    ProbablyUnscannable,
}

impl Verdict {
    /// Verdict for a damaged percentage at an EC level
    ///
    /// Cutoffs are 20% and 35% of the level's nominal recovery percentage,
    /// both inclusive.
    pub fn for_percentage(percentage: f64, level: EcLevel) -> Self {
        let threshold = f64::from(level.recovery_percent());
        if percentage <= threshold * LIKELY_SCANNABLE_FACTOR {
            Self::LikelyScannable
        } else if percentage <= threshold * MAY_SCAN_FACTOR {
            Self::MayScan
        } else {
            Self::ProbablyUnscannable
        }
    }

    /// Status line shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Self::LikelyScannable => "Likely Scannable",
            Self::MayScan => "May Scan (depends on damage location)",
            Self::ProbablyUnscannable => "Probably Unscannable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate damage figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageEstimate {
    /// Sum of mark areas in square pixels, overlaps included
    pub total_damaged_area: f64,
    /// Damaged share of the canvas in percent; may exceed 100
    pub percentage: f64,
    pub verdict: Verdict,
}

impl DamageEstimate {
    /// Percentage rounded to one decimal, e.g. `3.2%`
    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}
