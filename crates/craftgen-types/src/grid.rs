//! Grid coordinates and flattened cell indices.
//!
//! The map is a square of side `map_size`. Objects live on the ground plane
//! at `y = 4` and are addressed either by a 3-D [`Placement`] or by a
//! row-major [`Cell`] index:
//!
//! ```text
//! cell = (x - 1) + (z - 1) * map_size
//! ```
//!
//! Both directions of the mapping are checked: a placement outside the grid
//! has no cell, and a cell past `map_size^2` has no placement.

use serde::{Deserialize, Serialize};

/// Height of the ground plane every object is placed on.
pub const GROUND_Y: u32 = 4;

/// Smallest map side length the generator accepts.
pub const MIN_MAP_SIZE: u32 = 6;

/// Index into the flattened row-major encoding of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(pub u32);

impl Cell {
    /// Return the raw index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 3-D block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Column.
    pub x: u32,
    /// Height. Always [`GROUND_Y`] for generated objects.
    pub y: u32,
    /// Row.
    pub z: u32,
}

impl Placement {
    /// A placement on the ground plane.
    pub const fn ground(x: u32, z: u32) -> Self {
        Self { x, y: GROUND_Y, z }
    }

    /// The placement `steps` units ahead along `z`.
    ///
    /// Returns `None` if the row would overflow.
    pub const fn ahead(self, steps: u32) -> Option<Self> {
        match self.z.checked_add(steps) {
            Some(z) => Some(Self { x: self.x, y: self.y, z }),
            None => None,
        }
    }

    /// The coordinate as `[x, y, z]`, the layout used by scene files.
    pub const fn to_array(self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }
}

impl core::fmt::Display for Placement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// A square grid of side `size`, converting between placements and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
}

impl Grid {
    /// Create a grid with the given side length.
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    /// Side length.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells (`size^2`), or `None` on overflow.
    pub const fn cell_count(&self) -> Option<u32> {
        self.size.checked_mul(self.size)
    }

    /// Upper bound on the number of trees a layout may request:
    /// `size * floor(size / 3)`.
    pub const fn max_trees(&self) -> u32 {
        self.size.saturating_mul(self.size / 3)
    }

    /// Map a placement to its cell index.
    ///
    /// Returns `None` when `x` or `z` falls outside `[1, size]`.
    pub fn cell_of(&self, placement: Placement) -> Option<Cell> {
        let col = placement.x.checked_sub(1)?;
        let row = placement.z.checked_sub(1)?;
        if col >= self.size || row >= self.size {
            return None;
        }
        let index = row.checked_mul(self.size)?.checked_add(col)?;
        Some(Cell(index))
    }

    /// Map a cell index back to a ground-plane placement.
    ///
    /// Returns `None` for an index outside the grid.
    pub fn placement_of(&self, cell: Cell) -> Option<Placement> {
        if cell.0 >= self.cell_count()? {
            return None;
        }
        let col = cell.0.checked_rem(self.size)?;
        let row = cell.0.checked_div(self.size)?;
        Some(Placement::ground(col.checked_add(1)?, row.checked_add(1)?))
    }
}
