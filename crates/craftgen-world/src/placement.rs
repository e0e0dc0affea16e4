//! Spatial placement engine.
//!
//! Places a crafting table, an agent, and a random number of trees on the
//! map so that no two footprints share a cell. Candidate points are drawn
//! uniformly from a window that keeps a margin of two cells off the low
//! edges:
//!
//! ```text
//! x ~ [2, map_size - 1]    y = 4    z ~ [2, map_size - 2]
//! ```
//!
//! # Draw order
//!
//! All randomness comes from the caller's generator, consumed in a fixed
//! order: table (`x`, `z`), agent (`x`, `z`, repeated until free), tree
//! count, then the candidate points for each tree. Reproducing a layout
//! needs the same seed and the same order.
//!
//! # Tree search
//!
//! Each tree gets at most [`MAX_TREE_ATTEMPTS`] candidates. The first one
//! whose whole footprint is free wins. If a tree exhausts its attempts,
//! placement stops: later tree slots are not tried, and the layout keeps
//! the trees placed so far.

use std::collections::BTreeSet;

use craftgen_types::{Cell, Footprint, Grid, MIN_MAP_SIZE, MapLayout, ObjectKind, Placement};
use rand::Rng;

use crate::error::WorldError;

/// Maximum candidate points tried for a single tree.
pub const MAX_TREE_ATTEMPTS: u32 = 100;

/// Lowest `x` and `z` a candidate point may take.
pub const PLACEMENT_MARGIN: u32 = 2;

/// A generated layout plus what happened while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    /// The accepted layout.
    pub layout: MapLayout,
    /// Tree count drawn before placement began.
    pub requested_trees: u32,
    /// Whether a tree ran out of attempts and cut the tree list short.
    pub exhausted: bool,
}

/// Draws overlap-free layouts for a fixed map size.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine {
    grid: Grid,
    max_trees: u32,
}

impl PlacementEngine {
    /// Create an engine for a `map_size x map_size` map.
    ///
    /// The tree bound defaults to `map_size * floor(map_size / 3)`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MapTooSmall`] if `map_size` is below
    /// [`MIN_MAP_SIZE`].
    pub fn new(map_size: u32) -> Result<Self, WorldError> {
        if map_size < MIN_MAP_SIZE {
            return Err(WorldError::MapTooSmall {
                size: map_size,
                min: MIN_MAP_SIZE,
            });
        }
        let grid = Grid::new(map_size);
        Ok(Self {
            grid,
            max_trees: grid.max_trees(),
        })
    }

    /// Override the upper bound on the sampled tree count.
    #[must_use]
    pub const fn with_max_trees(mut self, max_trees: u32) -> Self {
        self.max_trees = max_trees;
        self
    }

    /// The grid layouts are generated on.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Upper bound on the sampled tree count.
    pub const fn max_trees(&self) -> u32 {
        self.max_trees
    }

    /// Draw one candidate point from the placement window.
    pub fn sample_point(&self, rng: &mut impl Rng) -> Placement {
        let size = self.grid.size();
        let x = rng.random_range(PLACEMENT_MARGIN..=size.saturating_sub(1));
        let z = rng.random_range(PLACEMENT_MARGIN..=size.saturating_sub(2));
        Placement::ground(x, z)
    }

    /// Generate one layout.
    pub fn generate(&self, rng: &mut impl Rng) -> PlacementReport {
        let mut reserved: BTreeSet<Cell> = BTreeSet::new();

        let crafting_table = self.sample_point(rng);
        if let Some(footprint) = Footprint::of(&self.grid, ObjectKind::CraftingTable, crafting_table)
        {
            reserved.extend(footprint.cells().iter().copied());
        }

        let agent = loop {
            let candidate = self.sample_point(rng);
            if let Some(cell) = self.grid.cell_of(candidate) {
                if !reserved.contains(&cell) {
                    reserved.insert(cell);
                    break candidate;
                }
            }
        };

        let requested_trees = rng.random_range(0..=self.max_trees);
        let mut trees = Vec::new();
        let mut exhausted = false;

        for _ in 0..requested_trees {
            match self.place_tree(rng, &reserved) {
                Some((tree, footprint)) => {
                    reserved.extend(footprint.cells().iter().copied());
                    trees.push(tree);
                }
                None => {
                    exhausted = true;
                    tracing::trace!(
                        placed = trees.len(),
                        requested = requested_trees,
                        "tree placement exhausted, truncating tree list"
                    );
                    break;
                }
            }
        }

        PlacementReport {
            layout: MapLayout {
                map_size: self.grid.size(),
                crafting_table,
                agent,
                trees,
            },
            requested_trees,
            exhausted,
        }
    }

    /// Search for a free tree position within the attempt budget.
    fn place_tree(
        &self,
        rng: &mut impl Rng,
        reserved: &BTreeSet<Cell>,
    ) -> Option<(Placement, Footprint)> {
        for _ in 0..MAX_TREE_ATTEMPTS {
            let candidate = self.sample_point(rng);
            let Some(footprint) = Footprint::of(&self.grid, ObjectKind::Tree, candidate) else {
                continue;
            };
            if footprint.is_clear_of(reserved) {
                return Some((candidate, footprint));
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};

    use super::*;

    #[test]
    fn rejects_small_maps() {
        assert!(matches!(
            PlacementEngine::new(5),
            Err(WorldError::MapTooSmall { size: 5, min: 6 })
        ));
        assert!(PlacementEngine::new(6).is_ok());
    }

    #[test]
    fn sample_point_stays_in_window() {
        let engine = PlacementEngine::new(8).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = engine.sample_point(&mut rng);
            assert!((2..=7).contains(&p.x), "x out of window: {p}");
            assert!((2..=6).contains(&p.z), "z out of window: {p}");
            assert_eq!(p.y, 4);
        }
    }

    #[test]
    fn layouts_are_overlap_free() {
        for size in [6_u32, 7, 10, 16] {
            let engine = PlacementEngine::new(size).unwrap();
            for seed in 0..200_u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let report = engine.generate(&mut rng);
                assert!(
                    report.layout.is_overlap_free(),
                    "overlap for size {size} seed {seed}: {:?}",
                    report.layout
                );
                assert_ne!(report.layout.agent, report.layout.crafting_table);
            }
        }
    }

    #[test]
    fn tree_count_is_bounded() {
        for size in [6_u32, 9, 12] {
            let engine = PlacementEngine::new(size).unwrap();
            let bound = size * (size / 3);
            for seed in 0..200_u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let report = engine.generate(&mut rng);
                assert!(report.requested_trees <= bound);
                assert!(report.layout.tree_count() <= report.requested_trees as usize);
            }
        }
    }

    #[test]
    fn placed_trees_below_request_means_exhausted() {
        let engine = PlacementEngine::new(6).unwrap();
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let report = engine.generate(&mut rng);
            let short = report.layout.tree_count() < report.requested_trees as usize;
            assert_eq!(short, report.exhausted, "seed {seed}");
        }
    }

    #[test]
    fn small_map_saturates_before_request() {
        // A 6x6 window fits at most one tree per column, far below the
        // bound of 12, so a large request must be truncated.
        let engine = PlacementEngine::new(6).unwrap().with_max_trees(12);
        let truncated = (0..200_u64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            engine.generate(&mut rng).exhausted
        });
        assert!(truncated);
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(engine.generate(&mut rng).layout.tree_count() <= 4);
        }
    }

    #[test]
    fn exhausted_slot_ends_tree_placement() {
        let engine = PlacementEngine::new(6).unwrap().with_max_trees(12);
        let grid = engine.grid();
        let seed = (0..200_u64)
            .find(|seed| {
                let report = engine.generate(&mut StdRng::seed_from_u64(*seed));
                let requested = report.requested_trees as usize;
                report.exhausted && report.layout.tree_count() + 1 < requested
            })
            .unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut replay = rng.clone();
        let report = engine.generate(&mut rng);

        // Redraw table, agent, tree count, the placed trees, and exactly
        // one failed slot. Both generators must then be at the same point.
        let mut reserved = BTreeSet::new();
        let table = engine.sample_point(&mut replay);
        assert_eq!(table, report.layout.crafting_table);
        if let Some(footprint) = Footprint::of(&grid, ObjectKind::CraftingTable, table) {
            reserved.extend(footprint.cells().iter().copied());
        }
        let agent = loop {
            let candidate = engine.sample_point(&mut replay);
            let cell = grid.cell_of(candidate).unwrap();
            if reserved.insert(cell) {
                break candidate;
            }
        };
        assert_eq!(agent, report.layout.agent);
        assert_eq!(
            replay.random_range(0..=engine.max_trees()),
            report.requested_trees
        );
        for tree in &report.layout.trees {
            let (placed, footprint) = engine.place_tree(&mut replay, &reserved).unwrap();
            assert_eq!(placed, *tree);
            reserved.extend(footprint.cells().iter().copied());
        }
        assert!(engine.place_tree(&mut replay, &reserved).is_none());

        assert_eq!(rng.next_u64(), replay.next_u64());
    }

    #[test]
    fn zero_tree_bound_places_no_trees() {
        let engine = PlacementEngine::new(10).unwrap().with_max_trees(0);
        let mut rng = StdRng::seed_from_u64(3);
        let report = engine.generate(&mut rng);
        assert!(report.layout.trees.is_empty());
        assert!(!report.exhausted);
    }

    #[test]
    fn same_seed_same_layout() {
        let engine = PlacementEngine::new(12).unwrap();
        let mut a = StdRng::seed_from_u64(63);
        let mut b = StdRng::seed_from_u64(63);
        assert_eq!(engine.generate(&mut a), engine.generate(&mut b));
    }
}
