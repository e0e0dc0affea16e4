//! Dataset generation for craftgen.
//!
//! This crate ties the workspace together: it loads configuration, samples
//! inventories, keeps a batch free of duplicate instances, and writes each
//! accepted instance to a fresh output directory.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `craftgen-config.yaml`.
//! - [`inventory`] -- Uniform per-item inventory sampling.
//! - [`dedup`] -- [`Deduplicator`], batch-wide signature tracking.
//! - [`output`] -- [`OutputDir`], fresh dataset directories and
//!   all-or-nothing instance writes.
//! - [`batch`] -- [`BatchGenerator`] and [`generate_dataset`].
//! - [`error`] -- [`CoreError`] and [`OutputError`].

pub mod batch;
pub mod config;
pub mod dedup;
pub mod error;
pub mod inventory;
pub mod output;

// Re-export primary types at crate root.
pub use batch::{BatchGenerator, BatchRequest, BatchSummary, generate_dataset};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GeneratorConfig};
pub use dedup::{Deduplicator, SignatureMode};
pub use error::{CoreError, OutputError};
pub use inventory::sample_inventory;
pub use output::{OutputDir, OutputFile};
