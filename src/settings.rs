//! Game settings and tuning
//!
//! Loaded from an optional JSON file; missing keys fall back to [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{RoundError, SettingsError};

/// Runtime configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Board ===
    /// Spawn grid columns
    pub grid_width: usize,
    /// Spawn grid rows
    pub grid_height: usize,
    /// Start button center (normalized screen space)
    pub start_button_position: Vec2,
    pub start_button_size: f32,
    pub collectible_size: f32,

    // === Rules ===
    pub starting_lives: i32,
    /// Bonuses spawned when a run begins
    pub initial_bonus_count: usize,
    /// Probability (0-1) that a spawned bonus also grants a life
    pub extra_life_chance: f32,

    // === Timing (seconds) ===
    pub round_transition_secs: f32,
    pub hurt_transition_secs: f32,
    pub game_over_secs: f32,
    pub idle_timeout_secs: f32,
    pub splash_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            start_button_position: Vec2::new(START_BUTTON_X, START_BUTTON_Y),
            start_button_size: START_BUTTON_SIZE,
            collectible_size: COLLECTIBLE_SIZE,

            starting_lives: STARTING_LIVES,
            initial_bonus_count: INITIAL_BONUS_COUNT,
            extra_life_chance: EXTRA_LIFE_CHANCE,

            round_transition_secs: ROUND_TRANSITION_SECS,
            hurt_transition_secs: HURT_TRANSITION_SECS,
            game_over_secs: GAME_OVER_SECS,
            idle_timeout_secs: IDLE_TIMEOUT_SECS,
            splash_secs: SPLASH_SECS,
        }
    }
}

impl Settings {
    /// Settings with a specific seed, everything else default
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Number of cells in the spawn grid
    pub fn grid_capacity(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Largest single batch these settings can ask the spawn planner for
    pub fn max_batch(&self) -> usize {
        self.initial_bonus_count.max(MAX_BONUS_COUNT + MAX_MALUS_COUNT)
    }

    /// Reject settings the simulation cannot honor
    pub fn validate(&self) -> Result<(), RoundError> {
        let capacity = self.grid_capacity();
        let requested = self.max_batch();
        if requested > capacity {
            return Err(RoundError::CapacityExceeded {
                requested,
                capacity,
            });
        }

        let durations = [
            ("round_transition_secs", self.round_transition_secs),
            ("hurt_transition_secs", self.hurt_transition_secs),
            ("game_over_secs", self.game_over_secs),
            ("idle_timeout_secs", self.idle_timeout_secs),
            ("splash_secs", self.splash_secs),
        ];
        for (name, value) in durations {
            if !(value > 0.0 && value.is_finite()) {
                return Err(RoundError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.extra_life_chance) {
            return Err(RoundError::InvalidSettings(format!(
                "extra_life_chance must be within 0..=1, got {}",
                self.extra_life_chance
            )));
        }

        if self.initial_bonus_count == 0 {
            return Err(RoundError::InvalidSettings(
                "initial_bonus_count must be at least 1".to_string(),
            ));
        }

        if self.starting_lives < 0 {
            return Err(RoundError::InvalidSettings(format!(
                "starting_lives must not be negative, got {}",
                self.starting_lives
            )));
        }

        Ok(())
    }

    /// Load settings from a JSON file and validate them
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_small_grid_rejected() {
        let settings = Settings {
            grid_width: 4,
            grid_height: 4,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(RoundError::CapacityExceeded {
                requested: 21,
                capacity: 16
            })
        );
    }

    #[test]
    fn test_zero_duration_rejected() {
        let settings = Settings {
            hurt_transition_secs: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(RoundError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_empty_opening_board_rejected() {
        let settings = Settings {
            initial_bonus_count: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(RoundError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7, "grid_width": 10 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.grid_width, 10);
        assert_eq!(settings.grid_height, GRID_HEIGHT);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "splash_arcade_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: 42,
            splash_secs: 0.5,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let path = std::env::temp_dir().join(format!(
            "splash_arcade_bad_settings_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "grid_width": 2, "grid_height": 2 }"#).unwrap();
        let result = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(SettingsError::Invalid(RoundError::CapacityExceeded { .. }))
        ));
    }
}
