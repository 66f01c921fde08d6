//! PNG export of rendered symbols.

use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use image::ImageFormat;
use tracing::info;

use crate::error::ExportError;
use crate::RenderedSymbol;

/// A downloadable file produced from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// File name for an export taken at `timestamp_ms`
pub fn export_filename(timestamp_ms: u128) -> String {
    format!("qrcode-{timestamp_ms}.png")
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Encode a symbol's pixel snapshot as PNG
pub fn export_png(symbol: &RenderedSymbol, timestamp_ms: u128) -> Result<ExportArtifact, ExportError> {
    let mut bytes = Vec::new();
    symbol
        .image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    let filename = export_filename(timestamp_ms);
    info!("Exported {} ({} bytes)", filename, bytes.len());
    Ok(ExportArtifact { filename, bytes })
}

/// Encode an optional symbol, failing with [`ExportError::NoSymbol`] when absent
pub fn export_current(
    symbol: Option<&RenderedSymbol>,
    timestamp_ms: u128,
) -> Result<ExportArtifact, ExportError> {
    let symbol = symbol.ok_or(ExportError::NoSymbol)?;
    export_png(symbol, timestamp_ms)
}
