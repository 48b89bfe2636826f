//! Authoritative list of active collectibles
//!
//! The registry owns every live [`Collectible`] in insertion order and mirrors
//! each mutation into the collision detector by handle. After every mutation
//! the two counts are compared; a mismatch means a mirrored call was lost.

use super::collectible::{Collectible, CollectibleId};
use super::detector::CollisionDetector;
use crate::error::RoundError;

#[derive(Debug, Clone)]
pub struct Registry<D: CollisionDetector> {
    /// Active collectibles, oldest first
    items: Vec<Collectible>,
    detector: D,
}

impl<D: CollisionDetector> Registry<D> {
    pub fn new(detector: D) -> Self {
        Self {
            items: Vec::new(),
            detector,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Collectible> {
        self.items.iter_mut()
    }

    pub fn ids(&self) -> Vec<CollectibleId> {
        self.items.iter().map(|c| c.id).collect()
    }

    pub fn get(&self, id: CollectibleId) -> Option<&Collectible> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CollectibleId) -> Option<&mut Collectible> {
        self.items.iter_mut().find(|c| c.id == id)
    }

    pub fn at(&self, index: usize) -> Result<&Collectible, RoundError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(RoundError::IndexOutOfRange { index, len })
    }

    /// Append and mirror into the detector
    pub fn add(&mut self, collectible: Collectible) -> Result<CollectibleId, RoundError> {
        let id = collectible.id;
        self.detector
            .add_collectible(id, collectible.position, collectible.size);
        self.items.push(collectible);
        self.check_sync()?;
        Ok(id)
    }

    /// Remove the collectible at `index`; later entries shift down by one
    pub fn remove_at(&mut self, index: usize) -> Result<Collectible, RoundError> {
        let len = self.items.len();
        if index >= len {
            return Err(RoundError::IndexOutOfRange { index, len });
        }
        let removed = self.items.remove(index);
        self.detector.remove_collectible(removed.id);
        self.check_sync()?;
        Ok(removed)
    }

    pub fn remove(&mut self, id: CollectibleId) -> Result<Collectible, RoundError> {
        let index = self
            .items
            .iter()
            .position(|c| c.id == id)
            .ok_or(RoundError::UnknownCollectible(id))?;
        self.remove_at(index)
    }

    /// Remove every listed handle; all handles must be live
    pub fn remove_all(&mut self, ids: &[CollectibleId]) -> Result<(), RoundError> {
        for &id in ids {
            let removed = self.remove(id)?;
            log::debug!("Recycled {:?} ({:?})", removed.id, removed.kind);
        }
        Ok(())
    }

    /// Drop everything, here and in the detector
    pub fn clear(&mut self) -> Result<(), RoundError> {
        self.items.clear();
        self.detector.clear_all();
        self.check_sync()
    }

    /// Compare local and mirrored counts
    pub fn check_sync(&self) -> Result<(), RoundError> {
        let detector = self.detector.tracked();
        if detector != self.items.len() {
            return Err(RoundError::RegistryDesync {
                registry: self.items.len(),
                detector,
            });
        }
        Ok(())
    }
}
