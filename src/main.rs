//! Splash Arcade headless driver
//!
//! Runs a session at a fixed timestep with a scripted auto-player standing in
//! for the camera/collision layer, and logs every presentation intent.
//!
//! Usage: `splash-arcade [settings.json] [seconds]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use splash_arcade::Settings;
use splash_arcade::consts::{MAX_SUBSTEPS, SIM_DT};
use splash_arcade::sim::{
    CollectibleKind, GamePhase, MirrorDetector, PresentationIntent, RoundOrchestrator, TickInput,
    tick,
};
use splash_arcade::RoundError;

/// Default session length (simulated seconds)
const DEFAULT_SESSION_SECS: f32 = 180.0;
/// Simulated render frame time (30 fps, so each frame runs ~2 substeps)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Seconds between auto-player touches
const REACTION_SECS: f32 = 0.75;
/// Chance the auto-player goes for a bonus rather than a hazard
const AIM_BONUS_CHANCE: f64 = 0.9;

/// Session holding the simulation and driver state
struct Game {
    orchestrator: RoundOrchestrator<MirrorDetector>,
    accumulator: f32,
    input: TickInput,
    /// Auto-player's own RNG so it never perturbs the simulation's draws
    player_rng: Pcg32,
    reaction_timer: f32,
    intents_seen: usize,
}

impl Game {
    fn new(settings: Settings) -> Result<Self, RoundError> {
        let player_seed = settings.seed.wrapping_add(1);
        Ok(Self {
            orchestrator: RoundOrchestrator::new(settings, MirrorDetector::new())?,
            accumulator: 0.0,
            input: TickInput::default(),
            player_rng: Pcg32::seed_from_u64(player_seed),
            reaction_timer: 0.0,
            intents_seen: 0,
        })
    }

    /// Pick a spot to touch and turn it into detector hits
    fn auto_play(&mut self, dt: f32) {
        self.reaction_timer += dt;
        if self.reaction_timer < REACTION_SECS {
            return;
        }
        self.reaction_timer = 0.0;

        let phase = self.orchestrator.phase();
        let want_bonus = self.player_rng.random_bool(AIM_BONUS_CHANCE);
        let candidates: Vec<_> = self
            .orchestrator
            .registry()
            .iter()
            .filter(|c| !c.hit)
            .filter(|c| match (phase, c.kind) {
                (GamePhase::Title, CollectibleKind::StartButton) => true,
                (GamePhase::Playing, CollectibleKind::Bonus { .. }) => want_bonus,
                (GamePhase::Playing, CollectibleKind::Malus) => !want_bonus,
                _ => false,
            })
            .map(|c| c.position)
            .collect();

        if candidates.is_empty() {
            return;
        }
        let target = candidates[self.player_rng.random_range(0..candidates.len())];
        let hits = self.orchestrator.detector().probe(target);
        self.input.hits.extend(hits);
    }

    /// Run simulation ticks for one render frame
    fn update(&mut self, dt: f32) -> Result<(), RoundError> {
        self.auto_play(dt);

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.orchestrator, &self.input, SIM_DT)?;
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Hits are one-shot
            self.input.hits.clear();
        }

        self.present();
        Ok(())
    }

    /// Stand-in presentation layer: log what would be drawn or played
    fn present(&mut self) {
        for intent in self.orchestrator.drain_intents() {
            self.intents_seen += 1;
            match intent {
                PresentationIntent::ShowPhase(phase) => log::info!("[gui] show {:?}", phase),
                PresentationIntent::PlaySound(kind) => log::info!("[audio] play {:?}", kind),
                PresentationIntent::SetScoreDisplay { score, lives } => {
                    log::info!("[gui] score {} lives {}", score, lives)
                }
                PresentationIntent::SetGlobalVisualRatio { name, value } => {
                    log::trace!("[shader] {} = {:.3}", name.as_str(), value)
                }
                other => log::debug!("[present] {:?}", other),
            }
        }
    }
}

fn parse_args() -> (Option<String>, f32) {
    let mut settings_path = None;
    let mut seconds = DEFAULT_SESSION_SECS;
    for arg in std::env::args().skip(1) {
        match arg.parse::<f32>() {
            Ok(value) if value > 0.0 => seconds = value,
            _ => settings_path = Some(arg),
        }
    }
    (settings_path, seconds)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings_path, seconds) = parse_args();
    let settings = match settings_path {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };

    let mut game = Game::new(settings)?;
    let frames = (seconds / FRAME_DT).ceil() as u32;
    for _ in 0..frames {
        game.update(FRAME_DT)?;
    }

    log::info!(
        "Session finished after {:.1}s ({} intents)",
        game.orchestrator.now(),
        game.intents_seen
    );
    println!("{}", serde_json::to_string_pretty(game.orchestrator.state())?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Splash Arcade (headless) starting...");

    if let Err(err) = run() {
        log::error!("Fatal: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; the library is driven by the host page
}
