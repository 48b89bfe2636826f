//! Collision response
//!
//! The detector decides *whether* something was hit; this module decides what
//! a hit means for score, lives and phase.

use super::collectible::{CollectibleId, CollectibleKind};
use super::detector::CollisionDetector;
use super::intent::{PresentationIntent, SoundKind};
use super::state::{GamePhase, RoundOrchestrator};
use crate::error::RoundError;

impl<D: CollisionDetector> RoundOrchestrator<D> {
    /// React to the detector reporting a hit on `id`
    ///
    /// A handle the registry does not hold is a logic error. Hits on
    /// already-splashing collectibles are ignored, as are hits outside Title
    /// and Playing.
    pub fn handle_collision(&mut self, id: CollectibleId) -> Result<(), RoundError> {
        let now = self.now;
        let phase = self.state.phase;

        let Some(collectible) = self.registry.get_mut(id) else {
            return Err(RoundError::UnknownCollectible(id));
        };
        if collectible.hit {
            return Ok(());
        }
        if !matches!(phase, GamePhase::Title | GamePhase::Playing) {
            log::debug!("Ignoring collision with {:?} during {:?}", id, phase);
            return Ok(());
        }

        collectible.trigger_splash(now);
        let kind = collectible.kind;
        let position = collectible.position;
        log::debug!("Hit {:?} ({:?}) during {:?}", id, kind, phase);

        self.emit(PresentationIntent::SetSplashVisualPosition(position));

        if phase == GamePhase::Title {
            self.emit(PresentationIntent::PlaySound(SoundKind::Collision));
            return Ok(());
        }

        match kind {
            CollectibleKind::Bonus { grants_extra_life } => {
                self.collect_bonus(grants_extra_life);
            }
            CollectibleKind::Malus | CollectibleKind::StartButton => {
                self.take_hazard();
            }
        }
        Ok(())
    }

    fn collect_bonus(&mut self, grants_extra_life: bool) {
        self.state.score += 1;
        if grants_extra_life {
            self.state.lives += 1;
        }
        self.emit_score();
        self.emit(PresentationIntent::PlaySound(SoundKind::Collision));

        self.state.remaining_bonus_targets = self.state.remaining_bonus_targets.saturating_sub(1);
        if self.state.remaining_bonus_targets == 0 {
            self.goto_transition(self.settings.round_transition_secs);
            self.emit(PresentationIntent::PlaySound(SoundKind::Win));
        }
    }

    fn take_hazard(&mut self) {
        self.state.lives -= 1;
        if self.state.lives < 0 {
            self.goto_over();
            self.emit(PresentationIntent::PlaySound(SoundKind::GameOver));
        } else {
            self.emit_score();
            self.state.player_hurt = true;
            self.goto_transition(self.settings.hurt_transition_secs);
            self.emit(PresentationIntent::PlaySound(SoundKind::Collision));
        }
    }
}
