//! Player settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Particle budget presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EffectsLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl EffectsLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectsLevel::Low => "Low",
            EffectsLevel::Medium => "Medium",
            EffectsLevel::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(EffectsLevel::Low),
            "medium" | "med" => Some(EffectsLevel::Medium),
            "high" => Some(EffectsLevel::High),
            _ => None,
        }
    }

    /// Maximum live particles for this level
    pub fn max_particles(&self) -> usize {
        match self {
            EffectsLevel::Low => 100,
            EffectsLevel::Medium => 300,
            EffectsLevel::High => 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub effects: EffectsLevel,

    // === Visual Effects ===
    /// Feathers, sparkles and trails
    pub particles: bool,
    /// Camera shake on hits
    pub screen_shake: bool,

    // === Audio ===
    /// Start muted
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            effects: EffectsLevel::Medium,

            particles: true,
            screen_shake: true,

            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.effects.max_particles()
        }
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "aami_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {e}"),
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

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
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
    fn test_particle_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 300);
        settings.effects = EffectsLevel::High;
        assert_eq!(settings.max_particles(), 1000);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.effects, EffectsLevel::Medium);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_effects_level_names() {
        assert_eq!(EffectsLevel::from_name("MED"), Some(EffectsLevel::Medium));
        assert_eq!(EffectsLevel::from_name("ultra"), None);
        assert_eq!(EffectsLevel::High.as_str(), "High");
    }
}
