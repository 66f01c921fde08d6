//! Error types for rendering and export.

/// Errors that can occur while rendering a symbol
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Renderer error: {0}")]
    Backend(String),
}

/// Errors that can occur while exporting a symbol
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No QR code to export")]
    NoSymbol,

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}
