//! Game settings
//!
//! Physics tuning and canvas size, persisted as JSON.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::LoadError;
use crate::sim::PhysicsConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tuning injected into every level
    pub physics: PhysicsConfig,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl Settings {
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Parse settings, rejecting tuning the simulation cannot run with
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let settings: Settings = serde_json::from_str(json)?;
        if !settings.physics.is_valid() {
            return Err(LoadError::Invalid(format!(
                "physics tuning {:?} is not usable",
                settings.physics
            )));
        }
        if !(settings.canvas_width > 0.0 && settings.canvas_height > 0.0) {
            return Err(LoadError::Invalid(format!(
                "canvas {}x{} must be positive",
                settings.canvas_width, settings.canvas_height
            )));
        }
        Ok(settings)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(LoadError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_physics_override() {
        let settings =
            Settings::from_json(r#"{"physics": {"jump_velocity": -20.0}, "canvas_width": 800}"#)
                .unwrap();
        assert_eq!(settings.physics.jump_velocity, -20.0);
        assert_eq!(settings.physics.gravity, 1.0);
        assert_eq!(settings.canvas_size(), Vec2::new(800.0, 400.0));
    }

    #[test]
    fn test_unusable_tuning_rejected() {
        let result = Settings::from_json(r#"{"physics": {"player_width": 0}}"#);
        assert!(matches!(result, Err(LoadError::Invalid(_))));
        let result = Settings::from_json(r#"{"canvas_height": -1}"#);
        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/blockhop-settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.physics.gravity = 2.0;
        settings.physics.move_speed = 7.0;
        settings.canvas_width = 800.0;
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }
}
