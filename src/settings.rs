//! Game settings
//!
//! Read-only input supplied by the host: an inline JSON block on the web page,
//! or the `ARCADE_SETTINGS` environment variable natively. Nothing is saved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    VolumeOutOfRange { name: &'static str, value: f32 },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Begin with all audio silenced
    pub start_muted: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    /// Fixed RNG seed for reproducible question lists (clock-seeded when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            seed: None,
        }
    }
}

impl Settings {
    /// Element holding inline settings JSON on the host page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "arcade-settings";
    /// Environment variable holding settings JSON natively
    #[allow(dead_code)]
    const ENV_VAR: &'static str = "ARCADE_SETTINGS";

    /// Parse and validate settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { name, value });
            }
        }
        Ok(())
    }

    fn from_source(source: Option<String>) -> Self {
        let Some(json) = source else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_source(json)
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_source(std::env::var(Self::ENV_VAR).ok())
    }
}
