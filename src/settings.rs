//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Skin;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Character skin (cosmetic)
    pub skin: Skin,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Debug ===
    /// Digit keys grant power-ups / points
    pub cheats_enabled: bool,
    /// Let the game play itself
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin: Skin::Default,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            cheats_enabled: cfg!(debug_assertions),
            autopilot: false,
        }
    }
}

impl Settings {
    /// Select a skin by name; unknown names leave the setting unchanged
    pub fn set_skin_by_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.skin = Skin::try_from(name)?;
        Ok(())
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Settings JSON as stored in LocalStorage
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "run_or_die_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };

        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_by_name() {
        let mut settings = Settings::default();
        settings.set_skin_by_name("ninja").unwrap();
        assert_eq!(settings.skin, Skin::Ninja);

        assert!(settings.set_skin_by_name("zombie").is_err());
        assert_eq!(settings.skin, Skin::Ninja);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        assert!((settings.effective_volume() - 0.25).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_json_roundtrip_with_defaults() {
        let settings = Settings::from_json(r#"{ "skin": "robot", "muted": true }"#).unwrap();
        assert_eq!(settings.skin, Skin::Robot);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_saved_json_loads_back() {
        let settings = Settings {
            skin: Skin::Ninja,
            muted: true,
            autopilot: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains(r#""skin":"ninja""#));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_json_rejects_unknown_skin() {
        assert!(matches!(
            Settings::from_json(r#"{ "skin": "pirate" }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
