//! Persisted project document.
//!
//! The on-disk format is a small JSON object:
//!
//! ```json
//! {
//!   "qr_version": "1.0",
//!   "target_url": "https://example.com",
//!   "settings": {
//!     "size": 256,
//!     "error_correction": "M",
//!     "foreground_color": "#000000",
//!     "background_color": "#ffffff"
//!   }
//! }
//! ```
//!
//! Every field is optional on load. A missing field leaves the matching
//! setting at its prior value.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::settings::{QrSettings, SetOutcome, SettingUpdate, SettingsModel};
use crate::PROJECT_FORMAT_VERSION;

/// Rendering section of the project document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_correction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// The persisted project document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
}

impl ProjectDocument {
    /// Build a complete document from a settings snapshot
    pub fn from_settings(settings: &QrSettings) -> Self {
        Self {
            qr_version: Some(PROJECT_FORMAT_VERSION.to_string()),
            target_url: Some(settings.payload.clone()),
            settings: Some(ProjectSettings {
                size: Some(i64::from(settings.pixel_size)),
                error_correction: Some(settings.error_correction.as_str().to_string()),
                foreground_color: Some(settings.foreground.to_string()),
                background_color: Some(settings.background.to_string()),
            }),
        }
    }

    /// Parse a document, failing only on malformed JSON or mistyped fields
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        let document: Self = serde_json::from_str(json)?;
        if let Some(version) = document.qr_version.as_deref() {
            if version != PROJECT_FORMAT_VERSION {
                debug!("ProjectDocument::parse: unrecognized qr_version {version:?}, loading anyway");
            }
        }
        Ok(document)
    }

    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The field writes this document implies, in document order
    pub fn updates(&self) -> Vec<SettingUpdate> {
        let mut updates = Vec::new();
        if let Some(url) = &self.target_url {
            updates.push(SettingUpdate::Payload(url.clone()));
        }
        if let Some(settings) = &self.settings {
            if let Some(size) = settings.size {
                updates.push(SettingUpdate::PixelSize(size));
            }
            if let Some(level) = &settings.error_correction {
                updates.push(SettingUpdate::ErrorCorrection(level.clone()));
            }
            if let Some(color) = &settings.foreground_color {
                updates.push(SettingUpdate::ForegroundColor(color.clone()));
            }
            if let Some(color) = &settings.background_color {
                updates.push(SettingUpdate::BackgroundColor(color.clone()));
            }
        }
        updates
    }

    /// Apply every present field to the model
    pub fn apply_to(&self, model: &mut SettingsModel) -> Vec<SetOutcome> {
        self.updates().into_iter().map(|update| model.set(update)).collect()
    }
}

impl SettingsModel {
    /// Serialize the current settings as a project document
    pub fn to_project_json(&self) -> Result<String, serde_json::Error> {
        ProjectDocument::from_settings(self.current()).to_json()
    }

    /// Load a project document into this model
    ///
    /// On a [`LoadError`] the model is left untouched. Individual field
    /// rejections (unknown EC level, bad color) are returned, not raised.
    pub fn load_project_json(&mut self, json: &str) -> Result<Vec<SetOutcome>, LoadError> {
        let document = ProjectDocument::parse(json)?;
        let outcomes = document.apply_to(self);
        info!("Project loaded ({} fields)", outcomes.len());
        Ok(outcomes)
    }
}
