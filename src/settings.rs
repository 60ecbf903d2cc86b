//! Playground settings and preferences
//!
//! Persisted in LocalStorage on the web. The simulation never reads these
//! directly; it receives `PhysicsParams` built from them.

use serde::{Deserialize, Serialize};

use crate::sim::PhysicsParams;
use crate::theme::Ambience;

/// Player-facing toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Donuts fall and bounce on the floor (off = zen flow, free drift)
    pub gravity_enabled: bool,
    /// Tap/sprinkle sound effects and ambience
    pub sound_enabled: bool,
    /// Hide the control panel for an uncluttered view
    pub zen_mode: bool,
    /// Background track and matching palette
    pub ambience: Ambience,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity_enabled: false,
            sound_enabled: true,
            zen_mode: false,
            ambience: Ambience::Cafe,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Physics parameters for a viewport of the given size
    pub fn physics_params(&self, width: f32, height: f32) -> PhysicsParams {
        PhysicsParams::new(width, height, self.gravity_enabled)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "donut_playground_settings";

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                None
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
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
    fn test_defaults_are_zen() {
        let settings = Settings::default();
        assert!(!settings.gravity_enabled);
        assert!(settings.sound_enabled);
        assert_eq!(settings.ambience, Ambience::Cafe);
    }

    #[test]
    fn test_physics_params_follow_gravity_toggle() {
        let mut settings = Settings::default();
        assert!(!settings.physics_params(800.0, 600.0).gravity_enabled);

        settings.gravity_enabled = true;
        let params = settings.physics_params(800.0, 600.0);
        assert!(params.gravity_enabled);
        assert_eq!(params.bounds, glam::Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"gravity_enabled": true, "ambience": "Night"}"#)
            .expect("valid json");
        assert!(settings.gravity_enabled);
        assert_eq!(settings.ambience, Ambience::Night);
        assert!(settings.sound_enabled);
        assert_eq!(settings.master_volume, 0.8);

        assert!(Settings::from_json("not json").is_none());
    }
}
