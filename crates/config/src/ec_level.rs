use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidSetting;

/// QR error correction level
///
/// Each level trades data capacity for damage tolerance. The nominal
/// recovery percentages are the figures quoted by the QR standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EcLevel {
    /// Low, ~7% recovery
    L,
    /// Medium, ~15% recovery
    #[default]
    M,
    /// Quartile, ~25% recovery
    Q,
    /// High, ~30% recovery
    H,
}

impl EcLevel {
    /// All levels, lowest tolerance first
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    /// Nominal share of the symbol (in percent) that can be recovered
    pub fn recovery_percent(self) -> u32 {
        match self {
            Self::L => 7,
            Self::M => 15,
            Self::Q => 25,
            Self::H => 30,
        }
    }

    /// Human-readable label, e.g. `M (Medium)`
    pub fn label(self) -> &'static str {
        match self {
            Self::L => "L (Low)",
            Self::M => "M (Medium)",
            Self::Q => "Q (Quartile)",
            Self::H => "H (High)",
        }
    }

    /// Single-letter code used in the project document
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcLevel {
    type Err = InvalidSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(InvalidSetting::UnknownEcLevel(other.to_string())),
        }
    }
}
