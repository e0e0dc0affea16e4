//! The per-instance values both renderings are built from.
//!
//! A [`ProblemView`] is computed once for an accepted instance. The basic
//! and advanced template contexts are both projections of it, so shared
//! quantities (tree count, inventory counts) cannot disagree between the two
//! files.

use craftgen_types::{Cell, InventoryState, MapLayout, ObjectKind, Placement};
use serde::Serialize;

use crate::error::RenderError;

/// One inventory count as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCount {
    /// Planning-domain item name.
    pub name: String,
    /// Sampled count.
    pub count: u32,
}

/// Everything a rendering needs about one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemView {
    /// Problem name, e.g. `instance_3`.
    pub instance_name: String,
    /// Total cells on the map (`map_size^2`).
    pub cell_count: u32,
    /// Cell of the crafting table.
    pub crafting_table_cell: Cell,
    /// Cell of the agent.
    pub agent_cell: Cell,
    /// Cells of the trees, in placement order.
    pub tree_cells: Vec<Cell>,
    /// Counts for every configured item, in configuration order.
    pub inventory: Vec<RenderedCount>,
}

/// Template context for the basic rendering.
#[derive(Debug, Serialize)]
pub struct BasicContext<'a> {
    /// Problem name.
    pub instance_name: &'a str,
    /// Number of trees on the map.
    pub trees_in_map: usize,
    /// Inventory counts.
    pub inventory: &'a [RenderedCount],
}

/// Template context for the advanced rendering.
#[derive(Debug, Serialize)]
pub struct AdvancedContext<'a> {
    /// Problem name.
    pub instance_name: &'a str,
    /// Total cells on the map.
    pub cell_count: u32,
    /// Cell of the crafting table.
    pub crafting_table_cell: Cell,
    /// Every cell except the crafting table's.
    pub cells: Vec<Cell>,
    /// Cells holding neither a tree nor the crafting table.
    pub air_cells: Vec<Cell>,
    /// Cells holding a tree.
    pub tree_cells: &'a [Cell],
    /// Cell of the agent.
    pub agent_cell: Cell,
    /// Inventory counts.
    pub inventory: &'a [RenderedCount],
}

/// Placeholders the basic context provides.
pub const BASIC_PLACEHOLDERS: &[&str] = &["instance_name", "trees_in_map", "inventory"];

/// Placeholders the advanced context provides.
pub const ADVANCED_PLACEHOLDERS: &[&str] = &[
    "instance_name",
    "cell_count",
    "crafting_table_cell",
    "cells",
    "air_cells",
    "tree_cells",
    "agent_cell",
    "inventory",
];

impl ProblemView {
    /// Build the view for an accepted instance.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::GridTooLarge`] if `map_size^2` does not fit a
    /// cell index and [`RenderError::OutOfGrid`] if an object has no cell
    /// index.
    pub fn build(
        instance_name: &str,
        layout: &MapLayout,
        inventory: &InventoryState,
    ) -> Result<Self, RenderError> {
        let grid = layout.grid();
        let cell_count = grid.cell_count().ok_or(RenderError::GridTooLarge {
            map_size: layout.map_size,
        })?;
        let cell = |kind: ObjectKind, at: Placement| {
            grid.cell_of(at).ok_or(RenderError::OutOfGrid { kind, at })
        };

        let tree_cells = layout
            .trees
            .iter()
            .map(|t| cell(ObjectKind::Tree, *t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            instance_name: instance_name.to_owned(),
            cell_count,
            crafting_table_cell: cell(ObjectKind::CraftingTable, layout.crafting_table)?,
            agent_cell: cell(ObjectKind::Agent, layout.agent)?,
            tree_cells,
            inventory: inventory
                .entries()
                .iter()
                .map(|e| RenderedCount {
                    name: e.name.clone(),
                    count: e.count,
                })
                .collect(),
        })
    }

    /// Number of trees on the map.
    pub fn trees_in_map(&self) -> usize {
        self.tree_cells.len()
    }

    /// Every cell index except the crafting table's.
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.cell_count)
            .map(Cell)
            .filter(|c| *c != self.crafting_table_cell)
            .collect()
    }

    /// Cells that hold neither a tree nor the crafting table.
    pub fn air_cells(&self) -> Vec<Cell> {
        (0..self.cell_count)
            .map(Cell)
            .filter(|c| *c != self.crafting_table_cell && !self.tree_cells.contains(c))
            .collect()
    }

    /// Context for the basic template.
    pub fn basic_context(&self) -> BasicContext<'_> {
        BasicContext {
            instance_name: &self.instance_name,
            trees_in_map: self.trees_in_map(),
            inventory: &self.inventory,
        }
    }

    /// Context for the advanced template.
    pub fn advanced_context(&self) -> AdvancedContext<'_> {
        AdvancedContext {
            instance_name: &self.instance_name,
            cell_count: self.cell_count,
            crafting_table_cell: self.crafting_table_cell,
            cells: self.cells(),
            air_cells: self.air_cells(),
            tree_cells: &self.tree_cells,
            agent_cell: self.agent_cell,
            inventory: &self.inventory,
        }
    }
}
