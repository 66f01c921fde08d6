//! QR Lab capacity estimation
//!
//! This crate maps a payload length and error correction level to an
//! approximate QR version, grid size and byte capacity:
//! - [`tables`] - byte capacity per version (1-20) for each EC level
//! - [`estimate`] - the version/capacity estimator
//! - [`encoding`] - numbers behind the data-encoding visualization
//!
//! These are teaching approximations; the authoritative version is whatever
//! the QR encoder picks when it renders the symbol.

pub mod encoding;
pub mod estimate;
pub mod tables;

pub use encoding::*;
pub use estimate::*;
pub use tables::*;
