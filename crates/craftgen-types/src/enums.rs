//! Enumeration types for craftgen.

use serde::{Deserialize, Serialize};

/// Which crafting goal a batch of problems targets.
///
/// The variant selects the item list and ranges, the template directory, and
/// the dataset sub-directory problems are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskVariant {
    /// Craft a wooden sword from logs, planks, and sticks.
    WoodenSword,
    /// Craft a pogo stick, which needs a tree tap placed next to a tree.
    PogoStick,
}

impl TaskVariant {
    /// Every variant, in a stable order.
    pub const ALL: [Self; 2] = [Self::WoodenSword, Self::PogoStick];

    /// Directory name used for templates and datasets.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::WoodenSword => "wooden_sword",
            Self::PogoStick => "pogo_stick",
        }
    }
}

impl core::fmt::Display for TaskVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.dir_name())
    }
}
