//! Hex colors and advisory contrast checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidSetting;

/// An opaque sRGB color written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// Create a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an opaque RGBA quadruple
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// WCAG relative luminance in `0.0..=1.0`
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = InvalidSetting;

    /// Accepts `#rrggbb` and the `#rgb` shorthand, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSetting::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidSetting;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Contrast ratio between two colors, `1.0..=21.0`
pub fn contrast_ratio(a: HexColor, b: HexColor) -> f64 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Advisory verdict on whether a color pair is likely to scan
///
/// Not enforced anywhere; the settings model accepts any pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrastAdvice {
    /// Ratio of at least 7:1
    Good,
    /// Ratio of at least 3:1
    Marginal,
    /// Scanners will likely fail to separate modules
    Poor,
}

impl ContrastAdvice {
    /// Advice for a foreground/background pair
    pub fn for_pair(foreground: HexColor, background: HexColor) -> Self {
        let ratio = contrast_ratio(foreground, background);
        if ratio >= 7.0 {
            Self::Good
        } else if ratio >= 3.0 {
            Self::Marginal
        } else {
            Self::Poor
        }
    }
}
