//! Engine settings
//!
//! Persisted as JSON next to the level files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_SPEED, MAX_SUBSTEPS};
use crate::error::Result;

/// Engine settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball speed in cells per second
    pub ball_speed: f32,
    /// Maximum fixed ticks simulated per frame
    pub max_substeps: u32,

    // === Levels ===
    /// Directory scanned for level files
    pub levels_dir: PathBuf,
    /// Level file extension (without the dot)
    pub level_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,
            max_substeps: MAX_SUBSTEPS,
            levels_dir: PathBuf::from("levels"),
            level_extension: "lvl".to_string(),
        }
    }
}

impl Settings {
    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.ball_speed.is_finite() && self.ball_speed > 0.0) {
            log::warn!("Invalid ball speed {}, using {}", self.ball_speed, defaults.ball_speed);
            self.ball_speed = defaults.ball_speed;
        }
        if self.max_substeps == 0 {
            self.max_substeps = defaults.max_substeps;
        }
        if self.level_extension.is_empty() {
            self.level_extension = defaults.level_extension;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(err) => log::warn!("Malformed settings {}: {}", path.display(), err),
            },
            Err(err) => log::warn!("No settings at {}: {}", path.display(), err),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"ball_speed": 5.0}"#).unwrap();
        assert_eq!(settings.ball_speed, 5.0);
        assert_eq!(settings.level_extension, "lvl");
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_sanitized_rejects_bad_speed() {
        let settings = Settings {
            ball_speed: -1.0,
            max_substeps: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.ball_speed, BALL_SPEED);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/dont-touch-it/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
