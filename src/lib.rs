//! Splash Arcade - round orchestration core
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (phases, collectibles, spawning)
//! - `settings`: Runtime tuning loaded from JSON
//! - `error`: Error taxonomy shared by the simulation

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{RoundError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Spawn grid dimensions (cells)
    pub const GRID_WIDTH: usize = 8;
    pub const GRID_HEIGHT: usize = 6;

    /// Lives granted when a run starts
    pub const STARTING_LIVES: i32 = 3;
    /// Bonuses spawned for the first board of a run
    pub const INITIAL_BONUS_COUNT: usize = 3;

    /// Delay after a cleared board before the next round spawns
    pub const ROUND_TRANSITION_SECS: f32 = 5.0;
    /// Delay after a hazard hit before play resumes
    pub const HURT_TRANSITION_SECS: f32 = 1.0;
    /// Length of the game over sequence
    pub const GAME_OVER_SECS: f32 = 5.0;
    /// Idle watchdog: seconds without progress before forcing game over
    pub const IDLE_TIMEOUT_SECS: f32 = 60.0;
    /// Splash (collection/death) animation length
    pub const SPLASH_SECS: f32 = 1.0;

    /// Round escalation: lowest count for either draw
    pub const MIN_SPAWN_COUNT: usize = 3;
    /// Round escalation: cap on the round used for the bonus draw
    pub const BONUS_ROUND_CAP: u32 = 10;
    /// Round escalation: cap on the round used for the malus draw
    pub const MALUS_ROUND_CAP: u32 = 9;

    /// Start button placement (normalized screen space)
    pub const START_BUTTON_X: f32 = 0.5;
    pub const START_BUTTON_Y: f32 = 0.5;
    pub const START_BUTTON_SIZE: f32 = 0.3;
    /// Bonus/malus footprint (normalized screen space)
    pub const COLLECTIBLE_SIZE: f32 = 0.1;
    /// Chance that a spawned bonus also grants a life
    pub const EXTRA_LIFE_CHANCE: f32 = 0.05;

    /// Largest bonus count the escalation policy can draw
    pub const MAX_BONUS_COUNT: usize = MIN_SPAWN_COUNT + BONUS_ROUND_CAP as usize - 1;
    /// Largest malus count the escalation policy can draw
    pub const MAX_MALUS_COUNT: usize = MALUS_ROUND_CAP as usize;
}

/// Sine pulse over a normalized ratio: 0 at both ends, 1 in the middle
#[inline]
pub fn pulse(ratio: f32) -> f32 {
    (ratio * std::f32::consts::PI).sin()
}

/// Fast scanline flash used by hurt/over effects: rises and falls in the first 1/20th
#[inline]
pub fn scanline_pulse(ratio: f32) -> f32 {
    (ratio * 20.0).clamp(0.0, std::f32::consts::PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_endpoints() {
        assert!(pulse(0.0).abs() < 1e-6);
        assert!((pulse(0.5) - 1.0).abs() < 1e-6);
        assert!(pulse(1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scanline_pulse_settles() {
        assert!(scanline_pulse(0.0).abs() < 1e-6);
        assert!(scanline_pulse(0.05) > 0.8);
        // Clamped at PI once ratio passes ~0.157
        assert!(scanline_pulse(0.5).abs() < 1e-5);
        assert!(scanline_pulse(1.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_counts() {
        assert_eq!(consts::MAX_BONUS_COUNT, 12);
        assert_eq!(consts::MAX_MALUS_COUNT, 9);
    }
}
