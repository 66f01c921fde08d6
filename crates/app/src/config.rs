//! Application configuration read from the environment

use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines (default)
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse from environment variable QRLAB_LOG_FORMAT
    pub fn from_env() -> Self {
        Self::parse(std::env::var("QRLAB_LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct QrLabConfig {
    /// Filter directive used when neither QRLAB_LOG nor RUST_LOG is set
    pub default_log_level: String,
    pub log_format: LogFormat,
    /// Directory exported PNGs land in when no explicit path is given
    pub export_dir: PathBuf,
}

impl Default for QrLabConfig {
    fn default() -> Self {
        Self {
            default_log_level: "info".to_string(),
            log_format: LogFormat::from_env(),
            export_dir: std::env::var_os("QRLAB_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
