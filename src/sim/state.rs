//! Round state and phase transitions
//!
//! [`RoundOrchestrator`] is the only owner of cross-phase state. Every phase
//! entry goes through one of the `goto_*` functions below, which reset the
//! activity timestamp and queue the presentation intents for that phase.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectible::{Collectible, CollectibleId, CollectibleKind};
use super::cooldown::Cooldown;
use super::detector::CollisionDetector;
use super::intent::{PresentationIntent, VisualRatio};
use super::registry::Registry;
use super::spawn::{SpawnGrid, SpawnPlanner, round_spawn_counts};
use crate::error::RoundError;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Title,
    /// Active round
    Playing,
    /// Between rounds, or recovering from a hazard hit
    Transitioning,
    /// Run ended
    Over,
}

impl GamePhase {
    /// Phases the idle watchdog ignores
    pub fn is_resting(&self) -> bool {
        matches!(self, GamePhase::Title | GamePhase::Over)
    }
}

/// Scoreboard and progress for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: GamePhase,
    pub score: u64,
    /// Goes negative only on the hit that ends the run
    pub lives: i32,
    /// Rounds cleared this run (0 on the first board)
    pub round: u32,
    /// Bonuses left to collect on this board
    pub remaining_bonus_targets: usize,
    /// Current transition is a hurt recovery, not a round change
    pub player_hurt: bool,
    /// Simulated time of the last phase entry or splash activity
    pub last_activity: f64,
}

impl RoundState {
    pub fn new(lives: i32) -> Self {
        Self {
            phase: GamePhase::Title,
            score: 0,
            lives,
            round: 0,
            remaining_bonus_targets: 0,
            player_hurt: false,
            last_activity: 0.0,
        }
    }
}

/// Handle reserved for the start button
pub const START_BUTTON_ID: CollectibleId = CollectibleId(0);

/// Drives phases, scoring and collectible lifecycle
#[derive(Debug)]
pub struct RoundOrchestrator<D: CollisionDetector> {
    pub(super) settings: Settings,
    pub(super) state: RoundState,
    /// Simulated clock (seconds)
    pub(super) now: f64,
    /// Shared by transitions and the game over sequence
    pub(super) transition: Cooldown,
    pub(super) planner: SpawnPlanner,
    pub(super) registry: Registry<D>,
    pub(super) rng: Pcg32,
    /// Bonus/malus handles start after the start button
    next_id: u32,
    pub(super) intents: Vec<PresentationIntent>,
}

impl<D: CollisionDetector> RoundOrchestrator<D> {
    /// Validate settings, then enter the title screen
    pub fn new(settings: Settings, detector: D) -> Result<Self, RoundError> {
        settings.validate()?;

        let grid = SpawnGrid::new(settings.grid_width, settings.grid_height);
        let mut orchestrator = Self {
            state: RoundState::new(settings.starting_lives),
            now: 0.0,
            transition: Cooldown::new(settings.round_transition_secs),
            planner: SpawnPlanner::new(grid),
            registry: Registry::new(detector),
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: START_BUTTON_ID.0 + 1,
            intents: Vec::new(),
            settings,
        };

        log::info!(
            "Round orchestrator ready: seed={}, grid={}x{}",
            orchestrator.settings.seed,
            grid.width,
            grid.height
        );

        orchestrator.goto_title()?;
        Ok(orchestrator)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Simulated time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn registry(&self) -> &Registry<D> {
        &self.registry
    }

    pub fn detector(&self) -> &D {
        self.registry.detector()
    }

    pub fn transition_cooldown(&self) -> &Cooldown {
        &self.transition
    }

    /// Intents queued since the last drain
    pub fn pending_intents(&self) -> &[PresentationIntent] {
        &self.intents
    }

    /// Hand queued intents to the presentation layer
    pub fn drain_intents(&mut self) -> Vec<PresentationIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Forward a display change to the detector
    pub fn resolution_changed(&mut self) {
        self.registry.detector_mut().notify_resolution_changed();
    }

    pub(super) fn emit(&mut self, intent: PresentationIntent) {
        self.intents.push(intent);
    }

    pub(super) fn emit_ratio(&mut self, name: VisualRatio, value: f32) {
        self.intents.push(PresentationIntent::ratio(name, value));
    }

    fn enter(&mut self, phase: GamePhase) {
        log::info!("Phase {:?} -> {:?} at {:.2}s", self.state.phase, phase, self.now);
        self.state.phase = phase;
        self.emit(PresentationIntent::ShowPhase(phase));
    }

    fn allocate_id(&mut self) -> CollectibleId {
        let id = CollectibleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn score_display(&self) -> PresentationIntent {
        PresentationIntent::SetScoreDisplay {
            score: self.state.score,
            lives: self.state.lives,
        }
    }

    pub(super) fn emit_score(&mut self) {
        let intent = self.score_display();
        self.emit(intent);
    }

    /// Splash every collectible that has not been hit yet
    fn splash_unhit(&mut self) {
        let now = self.now;
        for collectible in self.registry.iter_mut().filter(|c| !c.hit) {
            collectible.trigger_splash(now);
        }
    }

    /// Deal a batch of positions and register the new collectibles
    fn spawn_batch(&mut self, bonus_count: usize, malus_count: usize) -> Result<(), RoundError> {
        let batch = self
            .planner
            .plan_batch(&mut self.rng, bonus_count, malus_count)?;

        let size = self.settings.collectible_size;
        let splash_secs = self.settings.splash_secs;
        let extra_life_chance = self.settings.extra_life_chance as f64;

        for position in batch.bonus {
            let grants_extra_life = self.rng.random_bool(extra_life_chance);
            let id = self.allocate_id();
            let kind = CollectibleKind::Bonus { grants_extra_life };
            self.registry
                .add(Collectible::new(id, kind, position, size, splash_secs))?;
        }
        for position in batch.malus {
            let id = self.allocate_id();
            self.registry.add(Collectible::new(
                id,
                CollectibleKind::Malus,
                position,
                size,
                splash_secs,
            ))?;
        }
        Ok(())
    }

    pub(super) fn goto_title(&mut self) -> Result<(), RoundError> {
        self.state.last_activity = self.now;
        self.enter(GamePhase::Title);
        self.emit(PresentationIntent::SetOverlayAlpha(1.0));

        self.registry.clear()?;
        let button = Collectible::new(
            START_BUTTON_ID,
            CollectibleKind::StartButton,
            self.settings.start_button_position,
            self.settings.start_button_size,
            self.settings.splash_secs,
        );
        self.registry.add(button)?;

        self.emit_ratio(VisualRatio::Splash, 0.0);
        self.emit_ratio(VisualRatio::ShowWebcam, 1.0);
        self.emit_ratio(VisualRatio::Hurt, 0.0);
        Ok(())
    }

    pub(super) fn goto_game(&mut self) -> Result<(), RoundError> {
        self.state.last_activity = self.now;
        self.enter(GamePhase::Playing);
        self.state.score = 0;
        self.state.round = 0;
        self.state.lives = self.settings.starting_lives;
        self.state.player_hurt = false;
        self.emit(PresentationIntent::SetOverlayAlpha(1.0));
        self.emit_score();

        self.registry.clear()?;
        let bonus_count = self.settings.initial_bonus_count;
        self.state.remaining_bonus_targets = bonus_count;
        self.spawn_batch(bonus_count, 0)?;
        log::info!("Run started: {} bonuses, {} lives", bonus_count, self.state.lives);

        self.emit_ratio(VisualRatio::Splash, 0.0);
        self.emit_ratio(VisualRatio::ShowWebcam, 0.0);
        self.emit_ratio(VisualRatio::Hurt, 0.0);
        Ok(())
    }

    /// Enter the between-phase countdown. Without a pending hurt this is a
    /// cleared board: unhit collectibles splash and a message shows.
    pub(super) fn goto_transition(&mut self, delay: f32) {
        self.state.last_activity = self.now;
        self.enter(GamePhase::Transitioning);
        self.emit(PresentationIntent::SetOverlayAlpha(1.0));

        if !self.state.player_hurt {
            self.emit(PresentationIntent::ShowRandomMessage);
            self.splash_unhit();
        }

        self.transition.start_with(self.now, delay);
    }

    /// Resume the same board after a hurt recovery
    pub(super) fn goto_back_to_game(&mut self) {
        self.state.last_activity = self.now;
        self.enter(GamePhase::Playing);
        self.state.player_hurt = false;
        self.emit_ratio(VisualRatio::Hurt, 0.0);
    }

    pub(super) fn goto_next_round(&mut self) -> Result<(), RoundError> {
        self.state.last_activity = self.now;
        self.enter(GamePhase::Playing);
        self.emit(PresentationIntent::SetOverlayAlpha(1.0));

        self.registry.clear()?;
        self.state.round += 1;
        let (bonus_count, malus_count) = round_spawn_counts(&mut self.rng, self.state.round);
        self.state.remaining_bonus_targets = bonus_count;
        self.spawn_batch(bonus_count, malus_count)?;
        log::info!(
            "Round {}: {} bonuses, {} malus",
            self.state.round,
            bonus_count,
            malus_count
        );

        self.emit_ratio(VisualRatio::Hurt, 0.0);
        Ok(())
    }

    pub(super) fn goto_over(&mut self) {
        self.enter(GamePhase::Over);
        self.emit(PresentationIntent::SetOverlayAlpha(1.0));
        self.emit(PresentationIntent::ShowOverMessage);
        self.splash_unhit();
        self.transition
            .start_with(self.now, self.settings.game_over_secs);
        log::info!(
            "Game over: score={}, round={}",
            self.state.score,
            self.state.round
        );
    }
}
