//! Presentation intents
//!
//! The simulation never talks to GUI, audio or shaders directly. It queues
//! intents that a presentation layer drains once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    Collision,
    GameOver,
    Win,
}

/// Named global visual parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualRatio {
    /// Splash wave strength
    Splash,
    /// Webcam overlay blend
    ShowWebcam,
    /// Hurt scanline strength
    Hurt,
}

impl VisualRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualRatio::Splash => "_SplashRatio",
            VisualRatio::ShowWebcam => "_ShowWebcam",
            VisualRatio::Hurt => "_HurtRatio",
        }
    }
}

/// One side effect requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PresentationIntent {
    ShowPhase(GamePhase),
    SetOverlayAlpha(f32),
    SetScoreDisplay { score: u64, lives: i32 },
    ShowRandomMessage,
    ShowOverMessage,
    UpdateMessageAnimation(f32),
    UpdateHurtAnimation(f32),
    UpdateRainbowEffect,
    PlaySound(SoundKind),
    SetSplashVisualPosition(Vec2),
    SetGlobalVisualRatio { name: VisualRatio, value: f32 },
}

impl PresentationIntent {
    pub fn ratio(name: VisualRatio, value: f32) -> Self {
        PresentationIntent::SetGlobalVisualRatio { name, value }
    }
}
