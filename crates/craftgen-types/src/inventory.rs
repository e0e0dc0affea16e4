//! Item specifications and sampled inventories.
//!
//! Items are configured as an ordered list. The order matters: an item's
//! position in the list is the inventory slot it occupies in scene files and
//! in the itemized view used for deduplication.

use serde::{Deserialize, Serialize};

/// A configured inventory item with its sampling bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// External item identifier (e.g. `minecraft:log`).
    pub id: String,
    /// Name used by the planning domain (e.g. `log` in `count_log_in_inventory`).
    pub name: String,
    /// Inclusive upper bound for the sampled count.
    pub max: u32,
}

impl ItemSpec {
    /// Build an item spec.
    pub fn new(id: &str, name: &str, max: u32) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            max,
        }
    }
}

/// One item's sampled count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    /// External item identifier.
    pub id: String,
    /// Planning-domain name.
    pub name: String,
    /// Sampled count.
    pub count: u32,
}

/// A non-empty inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InventorySlot {
    /// Position of the item in the configured item list.
    pub slot: u32,
    /// External item identifier.
    pub item: String,
    /// Number of items, always greater than zero.
    pub count: u32,
}

/// Sampled counts for every configured item, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    entries: Vec<ItemCount>,
}

impl InventoryState {
    /// Wrap counts that are already in configuration order.
    pub const fn new(entries: Vec<ItemCount>) -> Self {
        Self { entries }
    }

    /// All items, zero counts included.
    pub fn entries(&self) -> &[ItemCount] {
        &self.entries
    }

    /// Count for the item with the given identifier.
    pub fn count(&self, id: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.count)
    }

    /// Non-zero items tagged with their slot index.
    pub fn itemized(&self) -> Vec<InventorySlot> {
        self.entries
            .iter()
            .zip(0_u32..)
            .filter(|(entry, _)| entry.count > 0)
            .map(|(entry, slot)| InventorySlot {
                slot,
                item: entry.id.clone(),
                count: entry.count,
            })
            .collect()
    }
}
