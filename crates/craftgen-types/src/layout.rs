//! Object footprints and the accepted map layout.
//!
//! Every object reserves the cells it stands on plus clearance ahead of it
//! along `z`:
//!
//! | Object         | Reserved cells          |
//! |----------------|-------------------------|
//! | Crafting table | `z`, `z+1`              |
//! | Tree           | `z`, `z+1`, `z+2`       |
//! | Agent          | `z`                     |
//!
//! A [`MapLayout`] is valid only when these reservations are pairwise
//! disjoint.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid, Placement};

/// The kinds of object the placement engine puts on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// The crafting table. Reserves standing room in front of it.
    CraftingTable,
    /// The agent's spawn point.
    Agent,
    /// A tree. Reserves room for a tree tap placed next to it.
    Tree,
}

impl ObjectKind {
    /// Number of consecutive cells along `z` this object reserves.
    pub const fn footprint_depth(self) -> u32 {
        match self {
            Self::CraftingTable => 2,
            Self::Agent => 1,
            Self::Tree => 3,
        }
    }

    /// Block name used in scene block lists.
    ///
    /// The agent is a spawn point, not a block, and has none.
    pub const fn block_name(self) -> Option<&'static str> {
        match self {
            Self::CraftingTable => Some("minecraft:crafting_table"),
            Self::Agent => None,
            Self::Tree => Some("tree"),
        }
    }
}

/// The set of cells an object reserves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    kind: ObjectKind,
    cells: Vec<Cell>,
}

impl Footprint {
    /// Compute the footprint of `kind` standing at `origin`.
    ///
    /// Returns `None` if any reserved cell falls outside the grid.
    pub fn of(grid: &Grid, kind: ObjectKind, origin: Placement) -> Option<Self> {
        let mut cells = Vec::new();
        for step in 0..kind.footprint_depth() {
            cells.push(grid.cell_of(origin.ahead(step)?)?);
        }
        Some(Self { kind, cells })
    }

    /// The object this footprint belongs to.
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Reserved cells, origin first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether none of the reserved cells is in `reserved`.
    pub fn is_clear_of(&self, reserved: &BTreeSet<Cell>) -> bool {
        self.cells.iter().all(|cell| !reserved.contains(cell))
    }
}

/// An accepted, overlap-free arrangement of table, agent, and trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Side length of the map.
    pub map_size: u32,
    /// Crafting table position.
    pub crafting_table: Placement,
    /// Agent spawn position.
    pub agent: Placement,
    /// Tree positions in placement order.
    pub trees: Vec<Placement>,
}

impl MapLayout {
    /// The grid this layout lives on.
    pub const fn grid(&self) -> Grid {
        Grid::new(self.map_size)
    }

    /// Number of trees that were placed.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Footprints of every object: table, agent, then trees in order.
    ///
    /// Returns `None` if any footprint leaves the grid.
    pub fn footprints(&self) -> Option<Vec<Footprint>> {
        let grid = self.grid();
        let mut out = Vec::with_capacity(self.trees.len().saturating_add(2));
        out.push(Footprint::of(&grid, ObjectKind::CraftingTable, self.crafting_table)?);
        out.push(Footprint::of(&grid, ObjectKind::Agent, self.agent)?);
        for tree in &self.trees {
            out.push(Footprint::of(&grid, ObjectKind::Tree, *tree)?);
        }
        Some(out)
    }

    /// Whether all footprints are inside the grid and pairwise disjoint.
    pub fn is_overlap_free(&self) -> bool {
        let Some(footprints) = self.footprints() else {
            return false;
        };
        let mut reserved = BTreeSet::new();
        for footprint in &footprints {
            for cell in footprint.cells() {
                if !reserved.insert(*cell) {
                    return false;
                }
            }
        }
        true
    }
}
