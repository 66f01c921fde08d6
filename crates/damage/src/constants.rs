/// Accounting radius in pixels for brush sizes 1-5.
pub const MARK_RADII: [f64; 5] = [0.5, 0.6, 0.75, 1.0, 1.5];

/// Preview ring radius as a fraction of canvas width for brush sizes 1-5.
/// Display only; never used for area accounting.
pub const PREVIEW_FRACTIONS: [f64; 5] = [0.02, 0.05, 0.10, 0.20, 0.35];

/// Display names for brush sizes 1-5.
pub const BRUSH_NAMES: [&str; 5] = ["Tiny", "Small", "Medium", "Large", "Huge"];

/// Brush size selected when a session starts.
pub const DEFAULT_BRUSH_SIZE: u8 = 3;

/// Share of the EC threshold below which a symbol likely scans.
pub const LIKELY_SCANNABLE_FACTOR: f64 = 0.20;

/// Share of the EC threshold below which a symbol may scan.
pub const MAY_SCAN_FACTOR: f64 = 0.35;

/// Damage coverage used for the brush info label.
pub const CLICK_ESTIMATE_PERCENT: f64 = 25.0;

/// Fill color of damage marks (rgba 239, 68, 68 at 0.7).
pub const DAMAGE_FILL: [u8; 3] = [239, 68, 68];
pub const DAMAGE_FILL_ALPHA: f32 = 0.7;

/// Stroke color of the brush preview (rgba 239, 68, 68 at 0.9).
pub const PREVIEW_STROKE_ALPHA: f32 = 0.9;

/// Brush preview line width in pixels.
pub const PREVIEW_LINE_WIDTH: f32 = 3.0;

/// Half length of the brush preview crosshair in pixels.
pub const CROSSHAIR_HALF_LENGTH: i64 = 5;
