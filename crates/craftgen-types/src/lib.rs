//! Shared type definitions for the craftgen planning-problem generator.
//!
//! Every crate in the workspace speaks in these types: grid coordinates and
//! cell indices, object footprints, map layouts, inventories, and the
//! signatures used to keep a batch free of duplicate instances.
//!
//! # Modules
//!
//! - [`grid`] -- [`Cell`] indices, [`Placement`] coordinates, and the
//!   [`Grid`] that converts between them
//! - [`layout`] -- [`ObjectKind`], [`Footprint`], and the accepted [`MapLayout`]
//! - [`inventory`] -- [`ItemSpec`], [`InventoryState`], and itemized [`InventorySlot`]s
//! - [`enums`] -- [`TaskVariant`]
//! - [`signature`] -- [`InstanceSignature`] for batch deduplication

pub mod enums;
pub mod grid;
pub mod inventory;
pub mod layout;
pub mod signature;

// Re-export all public types at crate root for convenience.
pub use enums::TaskVariant;
pub use grid::{Cell, GROUND_Y, Grid, MIN_MAP_SIZE, Placement};
pub use inventory::{InventorySlot, InventoryState, ItemCount, ItemSpec};
pub use layout::{Footprint, MapLayout, ObjectKind};
pub use signature::InstanceSignature;
