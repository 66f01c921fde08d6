//! Damage brush sizes
//!
//! A brush size selects two unrelated radii: the accounting radius used to
//! sum damaged area, and the much larger preview radius drawn under the
//! cursor. The two scales are independent.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BRUSH_NAMES, CLICK_ESTIMATE_PERCENT, DEFAULT_BRUSH_SIZE, MARK_RADII, PREVIEW_FRACTIONS,
};

/// Brush size outside the supported range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Brush size {0} outside 1..=5")]
pub struct BrushSizeError(pub u8);

/// Damage brush size, 1 (Tiny) to 5 (Huge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BrushSize(u8);

impl BrushSize {
    /// Smallest brush
    pub const MIN: BrushSize = BrushSize(1);
    /// Largest brush
    pub const MAX: BrushSize = BrushSize(5);

    /// Create a brush size, rejecting values outside 1-5
    pub fn new(size: u8) -> Result<Self, BrushSizeError> {
        if (1..=5).contains(&size) {
            Ok(Self(size))
        } else {
            Err(BrushSizeError(size))
        }
    }

    /// Every brush size, smallest first
    pub fn all() -> impl Iterator<Item = BrushSize> {
        (1..=5).map(BrushSize)
    }

    /// Raw size value, 1-5
    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Radius in pixels used for damaged-area accounting
    pub fn mark_radius(self) -> f64 {
        MARK_RADII[self.index()]
    }

    /// Area in square pixels of one mark made with this brush
    pub fn mark_area(self) -> f64 {
        let r = self.mark_radius();
        PI * r * r
    }

    /// Radius in pixels of the on-screen preview ring
    pub fn preview_radius(self, canvas_width: u32) -> u32 {
        // Fraction is below 1, so the result fits back into u32
        (f64::from(canvas_width) * PREVIEW_FRACTIONS[self.index()]).floor() as u32
    }

    /// Display name
    pub fn name(self) -> &'static str {
        BRUSH_NAMES[self.index()]
    }

    /// Number of clicks needed to damage `percent` of a canvas
    pub fn clicks_for_percentage(self, canvas_area: u64, percent: f64) -> u64 {
        if canvas_area == 0 {
            return 0;
        }
        let target = canvas_area as f64 * percent / 100.0;
        (target / self.mark_area()).ceil().max(0.0) as u64
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(DEFAULT_BRUSH_SIZE)
    }
}

impl TryFrom<u8> for BrushSize {
    type Error = BrushSizeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BrushSize> for u8 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}

impl fmt::Display for BrushSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Brush summary shown next to the brush size control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrushInfo {
    pub size: BrushSize,
    pub name: &'static str,
    /// Clicks needed to reach 25% damage on the current canvas
    pub clicks_for_quarter: u64,
}

impl BrushInfo {
    /// Summary for a brush on a canvas of `canvas_area` square pixels
    pub fn new(size: BrushSize, canvas_area: u64) -> Self {
        Self {
            size,
            name: size.name(),
            clicks_for_quarter: size.clicks_for_percentage(canvas_area, CLICK_ESTIMATE_PERCENT),
        }
    }

    /// Label such as `Medium (~29 clicks for 25%)`
    pub fn label(&self) -> String {
        format!("{} (~{} clicks for 25%)", self.name, self.clicks_for_quarter)
    }
}
