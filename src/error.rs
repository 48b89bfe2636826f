//! Error taxonomy
//!
//! Everything in [`RoundError`] is a logic error: the core has no I/O, so
//! nothing here is retried. Callers are expected to surface these loudly.

use thiserror::Error;

use crate::sim::CollectibleId;

/// Failures raised by the round simulation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A spawn batch asked for more cells than the grid has
    #[error("spawn batch of {requested} exceeds grid capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// Registry and collision detector disagree on how many collectibles exist
    #[error("registry holds {registry} collectibles but detector tracks {detector}")]
    RegistryDesync { registry: usize, detector: usize },

    /// Positional access past the end of the registry
    #[error("collectible index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Handle does not name an active collectible
    #[error("unknown collectible {0:?}")]
    UnknownCollectible(CollectibleId),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Failures loading or saving [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] RoundError),
}
