//! Collision-testing collaborator boundary
//!
//! The simulation never tests geometry itself. It mirrors every registry
//! change into a [`CollisionDetector`], which reports hits back as
//! [`CollectibleId`]s through [`crate::sim::TickInput::hits`].

use glam::Vec2;

use super::collectible::CollectibleId;

/// Mirror of the active collectible set, keyed by stable handle
pub trait CollisionDetector {
    fn add_collectible(&mut self, id: CollectibleId, position: Vec2, size: f32);
    fn remove_collectible(&mut self, id: CollectibleId);
    fn clear_all(&mut self);
    /// Number of collectibles currently tracked
    fn tracked(&self) -> usize;
    /// Display resolution changed; no effect on the simulation
    fn notify_resolution_changed(&mut self) {}
}

/// A tracked collectible footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedShape {
    pub id: CollectibleId,
    pub position: Vec2,
    pub size: f32,
}

/// Headless detector: keeps footprints in insertion order and answers point probes
#[derive(Debug, Clone, Default)]
pub struct MirrorDetector {
    shapes: Vec<TrackedShape>,
    resolution_changes: u32,
}

impl MirrorDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[TrackedShape] {
        &self.shapes
    }

    pub fn ids(&self) -> Vec<CollectibleId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    pub fn resolution_changes(&self) -> u32 {
        self.resolution_changes
    }

    /// Collectibles whose circular footprint contains `point`
    pub fn probe(&self, point: Vec2) -> Vec<CollectibleId> {
        self.shapes
            .iter()
            .filter(|s| s.position.distance(point) <= s.size * 0.5)
            .map(|s| s.id)
            .collect()
    }
}

impl CollisionDetector for MirrorDetector {
    fn add_collectible(&mut self, id: CollectibleId, position: Vec2, size: f32) {
        self.shapes.push(TrackedShape { id, position, size });
    }

    fn remove_collectible(&mut self, id: CollectibleId) {
        self.shapes.retain(|s| s.id != id);
    }

    fn clear_all(&mut self) {
        self.shapes.clear();
    }

    fn tracked(&self) -> usize {
        self.shapes.len()
    }

    fn notify_resolution_changed(&mut self) {
        self.resolution_changes += 1;
    }
}
