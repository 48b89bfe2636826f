//! Per-frame simulation step
//!
//! One call per rendered frame: advance the clock, apply reported hits,
//! check the idle watchdog, then run the current phase's update.

use super::collectible::CollectibleId;
use super::detector::CollisionDetector;
use super::intent::{PresentationIntent, VisualRatio};
use super::state::{GamePhase, RoundOrchestrator, START_BUTTON_ID};
use crate::error::RoundError;
use crate::{pulse, scanline_pulse};

/// Events for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Collectibles the detector reported as hit this frame, in report order
    pub hits: Vec<CollectibleId>,
}

impl TickInput {
    pub fn hit(id: CollectibleId) -> Self {
        Self { hits: vec![id] }
    }
}

/// Advance the orchestrator by `dt` seconds
pub fn tick<D: CollisionDetector>(
    orchestrator: &mut RoundOrchestrator<D>,
    input: &TickInput,
    dt: f32,
) -> Result<(), RoundError> {
    orchestrator.now += dt.max(0.0) as f64;

    for &id in &input.hits {
        orchestrator.handle_collision(id)?;
    }

    orchestrator.check_idle_watchdog();

    match orchestrator.state.phase {
        GamePhase::Title => orchestrator.update_title(),
        GamePhase::Playing => orchestrator.update_playing(),
        GamePhase::Transitioning => orchestrator.update_transitioning(),
        GamePhase::Over => orchestrator.update_over(),
    }
}

impl<D: CollisionDetector> RoundOrchestrator<D> {
    /// Force game over when nothing has happened for too long outside Title/Over
    fn check_idle_watchdog(&mut self) {
        if self.state.phase.is_resting() {
            return;
        }
        let idle = self.now - self.state.last_activity;
        if idle < self.settings.idle_timeout_secs as f64 {
            return;
        }

        log::warn!(
            "Idle watchdog fired after {:.1}s in {:?}",
            idle,
            self.state.phase
        );
        let now = self.now;
        let splashed = self.registry.iter_mut().next().map(|first| {
            first.trigger_splash(now);
            first.position
        });
        if let Some(position) = splashed {
            self.emit(PresentationIntent::SetSplashVisualPosition(position));
        }
        self.goto_over();
    }

    fn update_title(&mut self) -> Result<(), RoundError> {
        let now = self.now;
        let Some(button) = self.registry.get(START_BUTTON_ID) else {
            return Ok(());
        };
        let hit = button.hit;
        let ratio = 1.0 - button.splash_ratio(now);
        let finished = button.splash_finished(now);

        if hit {
            self.emit_ratio(VisualRatio::Splash, ratio);
            self.emit_ratio(VisualRatio::ShowWebcam, ratio);
        }
        if finished {
            self.goto_game()?;
        }
        Ok(())
    }

    /// Splash feedback for hit collectibles; recycle the finished ones
    fn update_playing(&mut self) -> Result<(), RoundError> {
        let now = self.now;
        let mut finished = Vec::new();
        let mut splashing = false;

        for collectible in self.registry.iter().filter(|c| c.hit) {
            splashing = true;
            self.intents.push(PresentationIntent::ratio(
                VisualRatio::Splash,
                1.0 - collectible.splash_ratio(now),
            ));
            if collectible.splash_finished(now) {
                finished.push(collectible.id);
            }
        }

        if splashing {
            self.state.last_activity = now;
        }
        self.registry.remove_all(&finished)
    }

    fn update_transitioning(&mut self) -> Result<(), RoundError> {
        let t = self.transition.elapsed_ratio(self.now);
        let ratio = pulse(t);
        let expired = self.transition.is_expired(self.now);

        self.emit(PresentationIntent::UpdateRainbowEffect);
        self.emit_ratio(VisualRatio::Splash, ratio);

        if !self.state.player_hurt {
            self.emit(PresentationIntent::UpdateMessageAnimation(ratio));
            if expired {
                self.goto_next_round()?;
            }
        } else {
            self.emit(PresentationIntent::UpdateHurtAnimation(ratio));
            self.emit_ratio(VisualRatio::Hurt, scanline_pulse(t));
            if expired {
                self.goto_back_to_game();
            }
        }
        Ok(())
    }

    fn update_over(&mut self) -> Result<(), RoundError> {
        let t = self.transition.elapsed_ratio(self.now);
        let ratio = pulse(t);

        self.emit(PresentationIntent::UpdateRainbowEffect);
        self.emit(PresentationIntent::UpdateMessageAnimation(ratio));
        self.emit_ratio(VisualRatio::Splash, ratio);
        self.emit_ratio(VisualRatio::Hurt, scanline_pulse(t));

        if self.transition.is_expired(self.now) {
            self.goto_title()?;
        }
        Ok(())
    }
}
