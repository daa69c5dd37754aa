//! Movement, camera and HUD tuning
//!
//! Persisted as JSON in the working directory. Any load problem falls back
//! to the built-in defaults so a broken file can never block startup.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ControllerConfig;

/// Game settings and tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Movement ===
    /// Linear impulse per held direction, per second
    pub impulse_coeff: f32,
    /// Torque impulse per held direction, per second
    pub torque_coeff: f32,
    /// Vertical impulse of a grounded jump
    pub jump_impulse: f32,

    // === Camera ===
    /// Exponential smoothing rate for the chase camera
    pub camera_smooth_rate: f32,
    /// Camera position offset from the marble
    pub camera_offset: Vec3,
    /// Camera look-at offset from the marble
    pub camera_look_offset: Vec3,

    // === HUD ===
    /// Show the key-state indicators next to the timer
    pub show_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            impulse_coeff: IMPULSE_COEFF,
            torque_coeff: TORQUE_COEFF,
            jump_impulse: JUMP_IMPULSE,
            camera_smooth_rate: CAMERA_SMOOTH_RATE,
            camera_offset: CAMERA_OFFSET,
            camera_look_offset: CAMERA_LOOK_OFFSET,
            show_controls: true,
        }
    }
}

impl Settings {
    /// Settings file, looked up relative to the working directory
    pub const STORAGE_PATH: &'static str = "marble_dash_settings.json";

    pub fn load() -> Self {
        Self::load_from(Path::new(Self::STORAGE_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(Path::new(Self::STORAGE_PATH));
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Failed to save settings: {err}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Failed to encode settings: {err}"),
        }
    }

    /// Controller tunables derived from these settings.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            impulse_coeff: self.impulse_coeff,
            torque_coeff: self.torque_coeff,
            jump_impulse: self.jump_impulse,
            ..ControllerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_design_constants() {
        let settings = Settings::default();
        assert_eq!(settings.impulse_coeff, IMPULSE_COEFF);
        assert_eq!(settings.torque_coeff, TORQUE_COEFF);
        assert_eq!(settings.camera_offset, CAMERA_OFFSET);
        assert_eq!(settings.controller_config().jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("does_not_exist_settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = std::env::temp_dir().join("marble_dash_settings_test.json");
        let mut settings = Settings::default();
        settings.impulse_coeff = 0.9;
        settings.show_controls = false;

        settings.save_to(&path);
        let reloaded = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = std::env::temp_dir().join("marble_dash_settings_bad.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(settings, Settings::default());
    }
}
