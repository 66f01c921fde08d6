//! Error types for settings updates and project loading.

/// A settings write that could not be applied as requested.
///
/// These are never fatal: the settings model ignores the write (or clamps
/// it) and the caller may surface a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSetting {
    #[error("Unknown error correction level: {0:?}")]
    UnknownEcLevel(String),

    #[error("Invalid color value: {0:?}")]
    InvalidColor(String),

    #[error("Pixel size {requested} outside {min}..={max}")]
    PixelSizeOutOfRange { requested: i64, min: u32, max: u32 },
}

/// Errors that can occur while loading a project document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Malformed project document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid project document: {0}")]
    InvalidFormat(String),
}
