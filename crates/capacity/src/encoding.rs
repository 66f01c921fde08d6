//! Data-encoding visualization figures
//!
//! Simplified numbers used to illustrate how a payload becomes bits and how
//! much of a symbol goes to error correction. Not a real encoder.

use std::fmt::Write as _;

use serde::Serialize;

use qrlab_config::EcLevel;

/// Bytes shown in the binary preview before truncating
pub const BINARY_PREVIEW_BYTES: usize = 50;

/// Byte groups per line in the binary preview
pub const BINARY_PREVIEW_GROUPS_PER_LINE: usize = 6;

/// Modules per payload byte used by the rough module estimate
const MODULES_PER_BYTE: f64 = 10.0;

/// Breakdown of a payload for the encoding view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodingBreakdown {
    /// Characters in the payload
    pub char_count: usize,
    /// UTF-8 bytes in the payload
    pub byte_count: usize,
    /// Bits before error correction
    pub bit_count: usize,
    /// Binary rendering of the leading bytes
    pub binary_preview: String,
    /// Share of the symbol reserved for error correction, in percent
    pub ec_percent: u32,
    /// Share of the symbol left for data, in percent
    pub data_percent: u32,
    /// Rough total module count including error correction
    pub estimated_modules: u64,
}

impl EncodingBreakdown {
    /// Compute the breakdown for a payload at the given EC level
    pub fn for_payload(payload: &str, level: EcLevel) -> Self {
        let byte_count = payload.len();
        let ec_percent = level.recovery_percent();
        let estimated =
            (byte_count as f64 * MODULES_PER_BYTE * (1.0 + f64::from(ec_percent) / 100.0)).ceil();

        Self {
            char_count: payload.chars().count(),
            byte_count,
            bit_count: byte_count * 8,
            binary_preview: binary_preview(payload.as_bytes()),
            ec_percent,
            data_percent: 100 - ec_percent,
            // Non-negative and far below u64::MAX for any realistic payload
            estimated_modules: estimated as u64,
        }
    }
}

/// Render the leading bytes as space-separated 8-bit groups
///
/// A line break follows every sixth group; a trailer marks truncation.
pub fn binary_preview(bytes: &[u8]) -> String {
    let shown = bytes.len().min(BINARY_PREVIEW_BYTES);
    let mut out = String::with_capacity(shown * 9 + 20);

    for (i, byte) in bytes[..shown].iter().enumerate() {
        let _ = write!(out, "{byte:08b} ");
        if (i + 1) % BINARY_PREVIEW_GROUPS_PER_LINE == 0 {
            out.push('\n');
        }
    }

    if bytes.len() > shown {
        out.push_str("\n... (truncated)");
    }

    out.trim().to_string()
}
