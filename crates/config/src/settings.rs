//! Owned QR settings with clamp/reject update rules.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::HexColor;
use crate::ec_level::EcLevel;
use crate::error::InvalidSetting;
use crate::{
    DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_PAYLOAD, DEFAULT_PIXEL_SIZE, MAX_PIXEL_SIZE,
    MIN_PIXEL_SIZE,
};

/// Immutable snapshot of the QR settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSettings {
    /// Text or URL to encode
    pub payload: String,
    /// Side length of the rendered square symbol in pixels
    pub pixel_size: u32,
    /// Error correction level
    pub error_correction: EcLevel,
    /// Dark module color
    pub foreground: HexColor,
    /// Light module color
    pub background: HexColor,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            payload: DEFAULT_PAYLOAD.to_string(),
            pixel_size: DEFAULT_PIXEL_SIZE,
            error_correction: EcLevel::default(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl QrSettings {
    /// Payload length in bytes (UTF-8), the unit the capacity tables use
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// A single field write, carrying the raw value from the input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingUpdate {
    Payload(String),
    PixelSize(i64),
    ErrorCorrection(String),
    ForegroundColor(String),
    BackgroundColor(String),
}

/// What happened to a [`SettingUpdate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// Value stored as given
    Applied,
    /// Value stored after clamping into range
    Clamped(InvalidSetting),
    /// Write ignored, previous value kept
    Rejected(InvalidSetting),
}

impl SetOutcome {
    /// Whether the model changed as a result of the write
    pub fn is_stored(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// The settings model
///
/// Holds the current configuration as the single source of truth. It never
/// pushes notifications; the owner polls [`SettingsModel::get`] after writes.
#[derive(Debug, Clone, Default)]
pub struct SettingsModel {
    current: QrSettings,
}

impl SettingsModel {
    /// Create a model with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model starting from the given snapshot
    ///
    /// The pixel size is clamped into range.
    pub fn from_settings(mut settings: QrSettings) -> Self {
        settings.pixel_size = settings.pixel_size.clamp(MIN_PIXEL_SIZE, MAX_PIXEL_SIZE);
        Self { current: settings }
    }

    /// Copy of the current settings
    pub fn get(&self) -> QrSettings {
        self.current.clone()
    }

    /// Borrow the current settings without copying
    pub fn current(&self) -> &QrSettings {
        &self.current
    }

    /// Apply a field write
    ///
    /// Pixel sizes outside the configured bounds are clamped. Unknown EC
    /// levels and unparsable colors are ignored.
    pub fn set(&mut self, update: SettingUpdate) -> SetOutcome {
        let outcome = match update {
            SettingUpdate::Payload(payload) => {
                self.current.payload = payload;
                SetOutcome::Applied
            }
            SettingUpdate::PixelSize(requested) => {
                let clamped = requested.clamp(i64::from(MIN_PIXEL_SIZE), i64::from(MAX_PIXEL_SIZE));
                // Clamped into u32 range above
                self.current.pixel_size = clamped as u32;
                if clamped == requested {
                    SetOutcome::Applied
                } else {
                    SetOutcome::Clamped(InvalidSetting::PixelSizeOutOfRange {
                        requested,
                        min: MIN_PIXEL_SIZE,
                        max: MAX_PIXEL_SIZE,
                    })
                }
            }
            SettingUpdate::ErrorCorrection(level) => match level.parse::<EcLevel>() {
                Ok(level) => {
                    self.current.error_correction = level;
                    SetOutcome::Applied
                }
                Err(err) => SetOutcome::Rejected(err),
            },
            SettingUpdate::ForegroundColor(color) => match color.parse::<HexColor>() {
                Ok(color) => {
                    self.current.foreground = color;
                    SetOutcome::Applied
                }
                Err(err) => SetOutcome::Rejected(err),
            },
            SettingUpdate::BackgroundColor(color) => match color.parse::<HexColor>() {
                Ok(color) => {
                    self.current.background = color;
                    SetOutcome::Applied
                }
                Err(err) => SetOutcome::Rejected(err),
            },
        };

        match &outcome {
            SetOutcome::Applied => debug!("SettingsModel::set: applied"),
            SetOutcome::Clamped(reason) => warn!("SettingsModel::set: clamped ({reason})"),
            SetOutcome::Rejected(reason) => warn!("SettingsModel::set: ignored ({reason})"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let model = SettingsModel::new();
        let settings = model.get();
        assert_eq!(settings.payload, DEFAULT_PAYLOAD);
        assert_eq!(settings.pixel_size, DEFAULT_PIXEL_SIZE);
        assert_eq!(settings.error_correction, EcLevel::M);
        assert_eq!(settings.foreground, DEFAULT_FOREGROUND);
        assert_eq!(settings.background, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_pixel_size_is_clamped() {
        let mut model = SettingsModel::new();

        let outcome = model.set(SettingUpdate::PixelSize(5000));
        assert!(matches!(outcome, SetOutcome::Clamped(_)));
        assert_eq!(model.get().pixel_size, MAX_PIXEL_SIZE);

        let outcome = model.set(SettingUpdate::PixelSize(-3));
        assert!(matches!(outcome, SetOutcome::Clamped(_)));
        assert_eq!(model.get().pixel_size, MIN_PIXEL_SIZE);

        assert_eq!(model.set(SettingUpdate::PixelSize(300)), SetOutcome::Applied);
        assert_eq!(model.get().pixel_size, 300);
    }

    #[test]
    fn test_unknown_ec_level_is_ignored() {
        let mut model = SettingsModel::new();
        model.set(SettingUpdate::ErrorCorrection("H".into()));

        let outcome = model.set(SettingUpdate::ErrorCorrection("Z".into()));
        assert_eq!(
            outcome,
            SetOutcome::Rejected(InvalidSetting::UnknownEcLevel("Z".into()))
        );
        assert!(!outcome.is_stored());
        assert_eq!(model.get().error_correction, EcLevel::H);
    }

    #[test]
    fn test_bad_color_is_ignored() {
        let mut model = SettingsModel::new();
        model.set(SettingUpdate::ForegroundColor("#123456".into()));
        model.set(SettingUpdate::ForegroundColor("not-a-color".into()));
        assert_eq!(model.get().foreground, HexColor::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut model = SettingsModel::new();
        let mut snapshot = model.get();
        snapshot.payload.push_str("/changed");
        assert_eq!(model.get().payload, DEFAULT_PAYLOAD);

        model.set(SettingUpdate::Payload(String::new()));
        assert_eq!(model.get().payload_len(), 0);
    }

    #[test]
    fn test_from_settings_clamps_size() {
        let model = SettingsModel::from_settings(QrSettings {
            pixel_size: 10,
            ..Default::default()
        });
        assert_eq!(model.get().pixel_size, MIN_PIXEL_SIZE);
    }
}
