//! Collectible entities: start button, bonuses and hazards

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cooldown::Cooldown;

/// Stable handle for an active collectible (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectibleId(pub u32);

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Title screen button that starts a run
    StartButton,
    /// Scoring target; some also grant a life
    Bonus { grants_extra_life: bool },
    /// Hazard that costs a life
    Malus,
}

impl CollectibleKind {
    pub fn is_bonus(&self) -> bool {
        matches!(self, CollectibleKind::Bonus { .. })
    }
}

/// A spawned interactive entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: CollectibleId,
    pub kind: CollectibleKind,
    /// Center in normalized screen space
    pub position: Vec2,
    /// Footprint diameter in normalized screen space
    pub size: f32,
    /// Set once the collectible has been triggered (or force-splashed)
    pub hit: bool,
    /// Splash animation timer, started on hit
    pub splash: Cooldown,
}

impl Collectible {
    pub fn new(id: CollectibleId, kind: CollectibleKind, position: Vec2, size: f32, splash_secs: f32) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            hit: false,
            splash: Cooldown::new(splash_secs),
        }
    }

    /// Return to the untouched state (start button reuse)
    pub fn respawn(&mut self) {
        self.hit = false;
        self.splash.reset();
    }

    /// Mark as hit and start the splash animation
    pub fn trigger_splash(&mut self, now: f64) {
        self.hit = true;
        self.splash.start(now);
    }

    /// Splash progress in [0, 1]; 0 while untouched
    pub fn splash_ratio(&self, now: f64) -> f32 {
        if self.hit {
            self.splash.elapsed_ratio(now)
        } else {
            0.0
        }
    }

    /// True once the splash animation has fully played
    pub fn splash_finished(&self, now: f64) -> bool {
        self.hit && self.splash.is_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonus() -> Collectible {
        Collectible::new(
            CollectibleId(1),
            CollectibleKind::Bonus {
                grants_extra_life: false,
            },
            Vec2::new(0.25, 0.75),
            0.1,
            1.0,
        )
    }

    #[test]
    fn test_lifecycle() {
        let mut c = bonus();
        assert!(!c.hit);
        assert_eq!(c.splash_ratio(3.0), 0.0);
        assert!(!c.splash_finished(3.0));

        c.trigger_splash(3.0);
        assert!(c.hit);
        assert!(!c.splash_finished(3.5));
        assert!((c.splash_ratio(3.5) - 0.5).abs() < 1e-6);
        assert!(c.splash_finished(4.0));
    }

    #[test]
    fn test_respawn_clears_hit() {
        let mut c = bonus();
        c.trigger_splash(0.0);
        c.respawn();
        assert!(!c.hit);
        assert!(!c.splash_finished(10.0));
    }

    #[test]
    fn test_kind_dispatch() {
        assert!(CollectibleKind::Bonus { grants_extra_life: true }.is_bonus());
        assert!(!CollectibleKind::Malus.is_bonus());
        assert!(!CollectibleKind::StartButton.is_bonus());
    }
}
