//! Widget preferences
//!
//! Persisted separately from the board in client storage.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{StorageBackend, StoreError};

/// Confetti density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConfettiLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ConfettiLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfettiLevel::Low => "Low",
            ConfettiLevel::Medium => "Medium",
            ConfettiLevel::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(ConfettiLevel::Low),
            "medium" | "med" => Some(ConfettiLevel::Medium),
            "high" => Some(ConfettiLevel::High),
            _ => None,
        }
    }

    /// Multiplier applied to every burst's particle count
    pub fn particle_scale(&self) -> f32 {
        match self {
            ConfettiLevel::Low => 0.4,
            ConfettiLevel::Medium => 1.0,
            ConfettiLevel::High => 1.5,
        }
    }
}

/// Widget settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play the winner celebration
    pub celebrations: bool,
    /// Reduced motion (skip confetti and scale pops)
    pub reduced_motion: bool,
    /// Confetti density
    pub confetti: ConfettiLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            celebrations: true,
            reduced_motion: false,
            confetti: ConfettiLevel::Medium,
        }
    }
}

impl Settings {
    /// Effective celebration (respects reduced_motion)
    pub fn effective_celebrations(&self) -> bool {
        self.celebrations && !self.reduced_motion
    }

    /// Effective button/score pops (respects reduced_motion)
    pub fn effective_pulses(&self) -> bool {
        !self.reduced_motion
    }

    /// Stored settings, if any were saved and are readable
    pub fn load_stored(backend: &impl StorageBackend) -> Option<Self> {
        match backend.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    Some(settings)
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                None
            }
        }
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(backend: &impl StorageBackend) -> Self {
        Self::load_stored(backend).unwrap_or_else(|| {
            log::info!("Using default settings");
            Self::default()
        })
    }

    pub fn save(&self, backend: &mut impl StorageBackend) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        backend.set_item(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults_when_missing() {
        assert_eq!(Settings::load_stored(&MemoryStorage::new()), None);
        assert_eq!(Settings::load(&MemoryStorage::new()), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut backend = MemoryStorage::new();
        let settings = Settings {
            celebrations: false,
            reduced_motion: true,
            confetti: ConfettiLevel::High,
        };
        settings.save(&mut backend).unwrap();
        assert_eq!(Settings::load_stored(&backend), Some(settings.clone()));
        assert_eq!(Settings::load(&backend), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut backend = MemoryStorage::new();
        backend
            .set_item(SETTINGS_KEY, r#"{"reduced_motion":true}"#)
            .unwrap();
        let settings = Settings::load(&backend);
        assert!(settings.reduced_motion);
        assert!(settings.celebrations);
        assert!(!settings.effective_celebrations());
    }

    #[test]
    fn test_garbage_settings_fall_back() {
        let mut backend = MemoryStorage::new();
        backend.set_item(SETTINGS_KEY, "][").unwrap();
        assert_eq!(Settings::load_stored(&backend), None);
        assert_eq!(Settings::load(&backend), Settings::default());
    }

    #[test]
    fn test_confetti_level_from_str() {
        assert_eq!(ConfettiLevel::from_str("MED"), Some(ConfettiLevel::Medium));
        assert_eq!(ConfettiLevel::from_str("high"), Some(ConfettiLevel::High));
        assert_eq!(ConfettiLevel::from_str("max"), None);
        assert_eq!(ConfettiLevel::Low.as_str(), "Low");
    }
}
