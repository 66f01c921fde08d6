//! Shared configuration for QR Lab
//!
//! This crate provides the single source of truth for the QR settings
//! (payload, symbol size, error correction level, colors) shared by the
//! estimators, the renderer and the session:
//! - [`SettingsModel`] - owned, mutable settings with clamping/rejection rules
//! - [`EcLevel`] - the four nominal error correction tiers
//! - [`HexColor`] - `#rrggbb` colors with advisory contrast helpers
//! - [`ProjectDocument`] - the persisted JSON project format

mod color;
mod ec_level;
mod error;
mod project;
mod settings;

pub use color::*;
pub use ec_level::*;
pub use error::*;
pub use project::*;
pub use settings::*;

/// Default payload shown when a session starts
pub const DEFAULT_PAYLOAD: &str = "https://example.com";

/// Default symbol side length in pixels
pub const DEFAULT_PIXEL_SIZE: u32 = 256;

/// Smallest symbol side length accepted by the settings model
pub const MIN_PIXEL_SIZE: u32 = 100;

/// Largest symbol side length accepted by the settings model
pub const MAX_PIXEL_SIZE: u32 = 1000;

/// Default foreground (dark module) color
pub const DEFAULT_FOREGROUND: HexColor = HexColor::rgb(0x00, 0x00, 0x00);

/// Default background (light module) color
pub const DEFAULT_BACKGROUND: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

/// Project document schema version written by [`ProjectDocument::from_settings`]
pub const PROJECT_FORMAT_VERSION: &str = "1.0";
