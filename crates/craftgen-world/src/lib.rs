//! Map placement and scene splicing for craftgen.
//!
//! This crate owns everything spatial: drawing overlap-free layouts for the
//! crafting table, agent, and trees, and writing an accepted layout into an
//! external scene description.
//!
//! # Modules
//!
//! - [`error`] -- Error types for placement and scene operations.
//! - [`placement`] -- [`PlacementEngine`], bounded-retry layout generation.
//! - [`scene`] -- [`BaseScene`], splices layouts and inventories into a
//!   base scene JSON document.

pub mod error;
pub mod placement;
pub mod scene;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use placement::{MAX_TREE_ATTEMPTS, PlacementEngine, PlacementReport};
pub use scene::BaseScene;
