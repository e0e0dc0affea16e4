//! Canonical instance signatures for batch deduplication.
//!
//! A signature is only ever compared for equality and stored in a set. It is
//! never parsed back. Two instances with equal signatures produce identical
//! rendered output, so a batch keeps at most one of them.

use serde::{Deserialize, Serialize};

use crate::inventory::{InventorySlot, InventoryState};
use crate::layout::MapLayout;

/// Canonical key describing everything about an instance that reaches its
/// rendered output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceSignature(String);

impl InstanceSignature {
    /// Signature over the full layout and the itemized inventory.
    ///
    /// Covers the ordered tree placements, the crafting table, the agent, and
    /// every non-zero inventory slot.
    pub fn full(layout: &MapLayout, inventory: &InventoryState) -> Self {
        let trees = layout
            .trees
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self(format!(
            "trees=[{trees}];table={};agent={};items=[{}]",
            layout.crafting_table,
            layout.agent,
            format_slots(&inventory.itemized()),
        ))
    }

    /// Signature over the aggregate view only: tree count and itemized
    /// inventory. Used when only basic renderings are produced.
    pub fn aggregate(layout: &MapLayout, inventory: &InventoryState) -> Self {
        Self(format!(
            "trees={};items=[{}]",
            layout.tree_count(),
            format_slots(&inventory.itemized()),
        ))
    }
}

fn format_slots(slots: &[InventorySlot]) -> String {
    slots
        .iter()
        .map(|s| format!("{}:{}:{}", s.slot, s.item, s.count))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Placement;
    use crate::inventory::ItemCount;

    fn layout(trees: Vec<Placement>) -> MapLayout {
        MapLayout {
            map_size: 6,
            crafting_table: Placement::ground(2, 2),
            agent: Placement::ground(4, 3),
            trees,
        }
    }

    fn inventory(log: u32, planks: u32) -> InventoryState {
        InventoryState::new(vec![
            ItemCount {
                id: "minecraft:log".to_owned(),
                name: "log".to_owned(),
                count: log,
            },
            ItemCount {
                id: "minecraft:planks".to_owned(),
                name: "planks".to_owned(),
                count: planks,
            },
        ])
    }

    #[test]
    fn identical_instances_share_a_signature() {
        let a = InstanceSignature::full(&layout(vec![Placement::ground(5, 2)]), &inventory(1, 2));
        let b = InstanceSignature::full(&layout(vec![Placement::ground(5, 2)]), &inventory(1, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn tree_order_is_significant() {
        let a = layout(vec![Placement::ground(5, 2), Placement::ground(3, 2)]);
        let b = layout(vec![Placement::ground(3, 2), Placement::ground(5, 2)]);
        let inv = inventory(0, 0);
        assert_ne!(InstanceSignature::full(&a, &inv), InstanceSignature::full(&b, &inv));
    }

    #[test]
    fn agent_position_is_significant() {
        let a = layout(Vec::new());
        let mut b = layout(Vec::new());
        b.agent = Placement::ground(5, 4);
        let inv = inventory(0, 0);
        assert_ne!(InstanceSignature::full(&a, &inv), InstanceSignature::full(&b, &inv));
    }

    #[test]
    fn inventory_counts_are_significant() {
        let l = layout(Vec::new());
        assert_ne!(
            InstanceSignature::full(&l, &inventory(1, 0)),
            InstanceSignature::full(&l, &inventory(0, 1)),
        );
    }

    #[test]
    fn aggregate_ignores_positions() {
        let a = layout(vec![Placement::ground(5, 2)]);
        let mut b = layout(vec![Placement::ground(3, 2)]);
        b.agent = Placement::ground(5, 4);
        let inv = inventory(2, 0);
        assert_eq!(
            InstanceSignature::aggregate(&a, &inv),
            InstanceSignature::aggregate(&b, &inv),
        );
        assert_ne!(InstanceSignature::full(&a, &inv), InstanceSignature::full(&b, &inv));
    }
}
