//! QR Lab damage simulation
//!
//! This crate tracks user-placed circular damage marks over a rendered
//! symbol and estimates whether the symbol would still scan:
//! - [`types::DamageMark`] - a single mark, keyed by position and brush size
//! - [`brush`] - brush sizes, accounting radius and preview radius
//! - [`simulator`] - the mark set and the damage estimate
//! - [`overlay`] - painting marks and the brush preview onto the symbol image
//!
//! Damaged area is the plain sum of circle areas; overlapping marks are
//! counted twice.

pub mod brush;
pub mod constants;
pub mod overlay;
pub mod simulator;
pub mod types;

pub use brush::*;
pub use constants::*;
pub use overlay::*;
pub use simulator::*;
pub use types::*;
