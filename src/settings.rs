//! Player and device settings
//!
//! Persisted separately from best times: LocalStorage on the web, a JSON
//! file on native.

use serde::{Deserialize, Serialize};

use crate::consts::{SHAKE_THRESHOLD, TILT_SENSITIVITY};
use crate::difficulty::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Tilt degrees to velocity units per tick
    pub tilt_sensitivity: f32,
    /// Shaking the device sends the ball back to the start
    pub shake_to_reset: bool,
    /// Per-axis acceleration jump that counts as a shake
    pub shake_threshold: f32,

    // === Menu ===
    /// Difficulty selected last time
    pub last_difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_sensitivity: TILT_SENSITIVITY,
            shake_to_reset: true,
            shake_threshold: SHAKE_THRESHOLD,
            last_difficulty: Difficulty::Easy,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gravitrip_settings";

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from a file, defaults if it does not exist yet
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::web::storage_get(Self::STORAGE_KEY) {
            if let Ok(settings) = Self::from_json(&json) {
                log::info!("Loaded settings from LocalStorage");
                return settings;
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = self.to_json() {
            crate::platform::web::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}
