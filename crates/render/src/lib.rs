//! Rendering abstractions for QR Lab
//!
//! Defines the `SymbolRenderer` port the session renders through, a
//! `qrcode`-backed implementation, and PNG export of rendered symbols.
//! Module placement, masking and error correction codewords all live in the
//! `qrcode` crate; nothing here implements the QR standard.

mod error;
mod export;
mod qr;

use image::RgbaImage;
use qrlab_config::{EcLevel, HexColor, QrSettings};

pub use error::*;
pub use export::*;
pub use qr::*;

/// Everything a renderer needs to produce a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub payload: String,
    pub width: u32,
    pub height: u32,
    pub foreground: HexColor,
    pub background: HexColor,
    pub ec_level: EcLevel,
}

impl RenderRequest {
    /// Square request for a settings snapshot
    pub fn from_settings(settings: &QrSettings) -> Self {
        Self {
            payload: settings.payload.clone(),
            width: settings.pixel_size,
            height: settings.pixel_size,
            foreground: settings.foreground,
            background: settings.background,
            ec_level: settings.error_correction,
        }
    }
}

/// A rendered symbol and its display canvas
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    /// Display canvas width in pixels
    pub display_width: u32,
    /// Display canvas height in pixels
    pub display_height: u32,
    /// Module grid side length chosen by the encoder
    pub modules: u32,
    /// Stable pixel snapshot of the symbol
    pub image: RgbaImage,
}

impl RenderedSymbol {
    /// Display canvas area in square pixels
    pub fn display_area(&self) -> u64 {
        u64::from(self.display_width) * u64::from(self.display_height)
    }
}

/// Port for anything that can turn a request into a symbol image
///
/// Returning from `render` is the "render complete" signal: callers may
/// recompute anything derived from the symbol as soon as it returns `Ok`.
pub trait SymbolRenderer {
    /// Render a symbol
    fn render(&self, request: &RenderRequest) -> Result<RenderedSymbol, RenderError>;
}

impl<T: SymbolRenderer + ?Sized> SymbolRenderer for Box<T> {
    fn render(&self, request: &RenderRequest) -> Result<RenderedSymbol, RenderError> {
        (**self).render(request)
    }
}
