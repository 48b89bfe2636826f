//! Spawn planning on a flat grid
//!
//! Every batch reshuffles the full cell permutation and deals cells off the
//! front, so a batch never places two collectibles in the same cell.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::{BONUS_ROUND_CAP, MALUS_ROUND_CAP, MIN_SPAWN_COUNT};
use crate::error::RoundError;

/// Grid geometry: cell index <-> normalized screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnGrid {
    pub width: usize,
    pub height: usize,
}

impl SpawnGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Center of cell `index` (row-major) in [0, 1] x [0, 1]
    pub fn cell_position(&self, index: usize) -> Vec2 {
        let col = index % self.width;
        let row = index / self.width;
        Vec2::new(
            (col as f32 + 0.5) / self.width as f32,
            (row as f32 + 0.5) / self.height as f32,
        )
    }
}

/// Positions for one spawn batch, bonuses first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnBatch {
    pub bonus: Vec<Vec2>,
    pub malus: Vec<Vec2>,
}

impl SpawnBatch {
    pub fn len(&self) -> usize {
        self.bonus.len() + self.malus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Non-repeating cell dealer
#[derive(Debug, Clone)]
pub struct SpawnPlanner {
    grid: SpawnGrid,
    /// Permutation of `0..capacity`, reshuffled per batch
    cells: Vec<usize>,
}

impl SpawnPlanner {
    pub fn new(grid: SpawnGrid) -> Self {
        Self {
            grid,
            cells: (0..grid.capacity()).collect(),
        }
    }

    /// Shuffle and deal `bonus_count` then `malus_count` distinct cells
    pub fn plan_batch<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bonus_count: usize,
        malus_count: usize,
    ) -> Result<SpawnBatch, RoundError> {
        let capacity = self.grid.capacity();
        let requested = bonus_count
            .checked_add(malus_count)
            .ok_or(RoundError::CapacityExceeded {
                requested: usize::MAX,
                capacity,
            })?;
        if requested > capacity {
            return Err(RoundError::CapacityExceeded {
                requested,
                capacity,
            });
        }

        self.cells.shuffle(rng);

        let (bonus_cells, rest) = self.cells.split_at(bonus_count);
        let malus_cells = &rest[..malus_count];

        Ok(SpawnBatch {
            bonus: bonus_cells.iter().map(|&i| self.grid.cell_position(i)).collect(),
            malus: malus_cells.iter().map(|&i| self.grid.cell_position(i)).collect(),
        })
    }
}

/// Uniform draw over `lo..hi`; an empty range yields `lo`
fn draw_half_open<R: Rng + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        lo
    } else {
        rng.random_range(lo..hi)
    }
}

/// Bonus and malus counts for reaching `round`
///
/// bonus in [3, 3 + min(round, 10)), malus in [3, 1 + min(round, 9)).
/// Early rounds where the malus range is empty get the floor of 3.
pub fn round_spawn_counts<R: Rng + ?Sized>(rng: &mut R, round: u32) -> (usize, usize) {
    let bonus_hi = MIN_SPAWN_COUNT + round.min(BONUS_ROUND_CAP) as usize;
    let malus_hi = 1 + round.min(MALUS_ROUND_CAP) as usize;
    let bonus = draw_half_open(rng, MIN_SPAWN_COUNT, bonus_hi);
    let malus = draw_half_open(rng, MIN_SPAWN_COUNT, malus_hi);
    (bonus, malus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn planner() -> SpawnPlanner {
        SpawnPlanner::new(SpawnGrid::new(8, 6))
    }

    fn cell_key(p: Vec2) -> (u32, u32) {
        (p.x.to_bits(), p.y.to_bits())
    }

    #[test]
    fn test_cell_positions() {
        let grid = SpawnGrid::new(4, 2);
        assert_eq!(grid.cell_position(0), Vec2::new(0.125, 0.25));
        assert_eq!(grid.cell_position(3), Vec2::new(0.875, 0.25));
        assert_eq!(grid.cell_position(4), Vec2::new(0.125, 0.75));
        assert_eq!(grid.cell_position(7), Vec2::new(0.875, 0.75));
    }

    #[test]
    fn test_batch_sizes() {
        let mut rng = Pcg32::seed_from_u64(1);
        let batch = planner().plan_batch(&mut rng, 5, 4).unwrap();
        assert_eq!(batch.bonus.len(), 5);
        assert_eq!(batch.malus.len(), 4);
        assert_eq!(batch.len(), 9);
    }

    #[test]
    fn test_full_grid_uses_every_cell() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut planner = planner();
        let batch = planner.plan_batch(&mut rng, 40, 8).unwrap();
        let cells: HashSet<_> = batch.bonus.iter().chain(&batch.malus).map(|&p| cell_key(p)).collect();
        assert_eq!(cells.len(), 48);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut rng = Pcg32::seed_from_u64(3);
        let result = planner().plan_batch(&mut rng, 40, 9);
        assert_eq!(
            result,
            Err(RoundError::CapacityExceeded {
                requested: 49,
                capacity: 48
            })
        );
    }

    #[test]
    fn test_overflowing_request_is_capacity_error() {
        let mut rng = Pcg32::seed_from_u64(3);
        let result = planner().plan_batch(&mut rng, usize::MAX, 2);
        assert_eq!(
            result,
            Err(RoundError::CapacityExceeded {
                requested: usize::MAX,
                capacity: 48
            })
        );
    }

    #[test]
    fn test_batches_reshuffle() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut planner = planner();
        let a = planner.plan_batch(&mut rng, 10, 0).unwrap();
        let b = planner.plan_batch(&mut rng, 10, 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let mut a = planner();
        let mut b = planner();
        let batch_a = a.plan_batch(&mut Pcg32::seed_from_u64(9), 6, 6).unwrap();
        let batch_b = b.plan_batch(&mut Pcg32::seed_from_u64(9), 6, 6).unwrap();
        assert_eq!(batch_a, batch_b);
    }

    #[test]
    fn test_early_rounds_floor_malus() {
        let mut rng = Pcg32::seed_from_u64(5);
        for round in 0..=3 {
            let (bonus, malus) = round_spawn_counts(&mut rng, round);
            assert_eq!(malus, 3, "round {round}");
            if round <= 1 {
                assert_eq!(bonus, 3, "round {round}");
            }
        }
    }

    #[test]
    fn test_late_rounds_capped() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut max_bonus = 0;
        let mut max_malus = 0;
        for _ in 0..2000 {
            let (bonus, malus) = round_spawn_counts(&mut rng, 500);
            max_bonus = max_bonus.max(bonus);
            max_malus = max_malus.max(malus);
        }
        assert_eq!(max_bonus, 12);
        assert_eq!(max_malus, 9);
    }

    proptest! {
        #[test]
        fn prop_batch_never_repeats_cells(
            seed in any::<u64>(),
            width in 1usize..12,
            height in 1usize..12,
            bonus_frac in 0.0f64..=1.0,
            malus_frac in 0.0f64..=1.0,
        ) {
            let grid = SpawnGrid::new(width, height);
            let capacity = grid.capacity();
            let bonus = (capacity as f64 * bonus_frac) as usize;
            let malus = ((capacity - bonus) as f64 * malus_frac) as usize;

            let mut rng = Pcg32::seed_from_u64(seed);
            let batch = SpawnPlanner::new(grid).plan_batch(&mut rng, bonus, malus).unwrap();

            let cells: HashSet<_> = batch.bonus.iter().chain(&batch.malus).map(|&p| cell_key(p)).collect();
            prop_assert_eq!(cells.len(), bonus + malus);
        }

        #[test]
        fn prop_oversized_batch_fails(seed in any::<u64>(), width in 1usize..8, height in 1usize..8, extra in 1usize..5) {
            let grid = SpawnGrid::new(width, height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let result = SpawnPlanner::new(grid).plan_batch(&mut rng, grid.capacity(), extra);
            let is_capacity_error = matches!(result, Err(RoundError::CapacityExceeded { .. }));
            prop_assert!(is_capacity_error);
        }

        #[test]
        fn prop_round_counts_in_range(seed in any::<u64>(), round in 0u32..64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (bonus, malus) = round_spawn_counts(&mut rng, round);

            let bonus_hi = 3 + round.min(10) as usize;
            prop_assert!(bonus >= 3);
            prop_assert!(bonus < bonus_hi.max(4));

            let malus_hi = 1 + round.min(9) as usize;
            prop_assert!(malus >= 3);
            prop_assert!(malus < malus_hi.max(4));
        }
    }
}
