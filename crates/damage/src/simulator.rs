//! Damage simulator
//!
//! Holds the set of damage marks placed over the currently rendered symbol
//! together with that symbol's display canvas size. Marks only make sense
//! against the image they were placed on, so the owner must call
//! [`DamageSimulator::reset`] whenever the symbol changes size or payload.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use qrlab_config::EcLevel;

use crate::brush::BrushSize;
use crate::types::{DamageEstimate, DamageMark, MarkAddedResult, RandomDamageReport, Verdict};

/// Set of damage marks over a display canvas
#[derive(Debug, Clone, Default)]
pub struct DamageSimulator {
    marks: HashSet<DamageMark>,
    canvas_width: u32,
    canvas_height: u32,
}

impl DamageSimulator {
    /// Create a simulator with no canvas (zero area)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator sized to a canvas
    pub fn with_canvas(width: u32, height: u32) -> Self {
        let mut simulator = Self::new();
        simulator.reset(width, height);
        simulator
    }

    /// Clear all marks and adopt a new canvas size
    pub fn reset(&mut self, canvas_width: u32, canvas_height: u32) {
        debug!(
            "DamageSimulator::reset: {} marks dropped, canvas {}x{}",
            self.marks.len(),
            canvas_width,
            canvas_height
        );
        self.marks.clear();
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Clear all marks, keeping the canvas size
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Canvas size as `(width, height)`
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Canvas area in square pixels
    pub fn canvas_area(&self) -> u64 {
        u64::from(self.canvas_width) * u64::from(self.canvas_height)
    }

    /// Number of distinct marks
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Iterate over the marks in no particular order
    pub fn marks(&self) -> impl Iterator<Item = &DamageMark> {
        self.marks.iter()
    }

    /// Add a mark unless an identical one exists
    ///
    /// Coordinates are taken as given; clamping to the canvas is the
    /// caller's job.
    pub fn add_mark(&mut self, x: u32, y: u32, brush: BrushSize) -> MarkAddedResult {
        let applied = self.marks.insert(DamageMark::new(x, y, brush));
        MarkAddedResult { applied }
    }

    /// Scatter enough marks to add roughly `target_percentage` damage
    ///
    /// Spots landing on an existing mark are skipped, so fewer unique marks
    /// than requested may be added. The spot count never exceeds the number
    /// of canvas positions.
    pub fn add_random_damage<R>(
        &mut self,
        target_percentage: f64,
        brush: BrushSize,
        rng: &mut R,
    ) -> RandomDamageReport
    where
        R: Rng,
    {
        if self.canvas_width == 0 || self.canvas_height == 0 || target_percentage <= 0.0 {
            return RandomDamageReport {
                requested: 0,
                added: 0,
            };
        }

        let canvas_area = self.canvas_area();
        let target_area = target_percentage / 100.0 * canvas_area as f64;
        // A canvas has only `canvas_area` distinct positions per brush
        let requested = ((target_area / brush.mark_area()).ceil() as u64).min(canvas_area);

        let mut added = 0;
        for _ in 0..requested {
            let x = rng.random_range(0..self.canvas_width);
            let y = rng.random_range(0..self.canvas_height);
            if self.add_mark(x, y, brush).applied {
                added += 1;
            }
        }

        info!(
            "DamageSimulator::add_random_damage: {:.1}% with {} brush -> {}/{} spots",
            target_percentage, brush, added, requested
        );
        RandomDamageReport { requested, added }
    }

    /// Sum of mark areas, overlaps counted once per mark
    pub fn total_damaged_area(&self) -> f64 {
        self.marks.iter().map(DamageMark::area).sum()
    }

    /// Damage figures and verdict at an EC level
    pub fn estimate(&self, level: EcLevel) -> DamageEstimate {
        let total_damaged_area = self.total_damaged_area();
        let canvas_area = self.canvas_area();
        let percentage = if canvas_area > 0 {
            total_damaged_area / canvas_area as f64 * 100.0
        } else {
            0.0
        };

        DamageEstimate {
            total_damaged_area,
            percentage,
            verdict: Verdict::for_percentage(percentage, level),
        }
    }
}
