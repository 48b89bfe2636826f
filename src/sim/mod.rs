//! Deterministic round simulation
//!
//! All gameplay decisions live here. This module must stay pure:
//! - Simulated time only (passed in per tick)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, oldest first)
//! - No rendering, audio or platform dependencies

pub mod collectible;
pub mod collision;
pub mod cooldown;
pub mod detector;
pub mod intent;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collectible::{Collectible, CollectibleId, CollectibleKind};
pub use cooldown::Cooldown;
pub use detector::{CollisionDetector, MirrorDetector, TrackedShape};
pub use intent::{PresentationIntent, SoundKind, VisualRatio};
pub use registry::Registry;
pub use spawn::{SpawnBatch, SpawnGrid, SpawnPlanner, round_spawn_counts};
pub use state::{GamePhase, RoundOrchestrator, RoundState, START_BUTTON_ID};
pub use tick::{TickInput, tick};
