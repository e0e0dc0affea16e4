//! Error types for dataset generation.
//!
//! [`CoreError`] is the single error type the batch driver returns. It wraps
//! the errors of the crates it drives so callers can propagate with `?`.
//! [`OutputError`] covers the output directory and per-instance writes.

use std::path::PathBuf;

use craftgen_render::RenderError;
use craftgen_types::TaskVariant;
use craftgen_world::WorldError;

use crate::config::ConfigError;

/// Errors that can occur while generating a dataset.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The batch request failed validation.
    #[error("invalid batch request: {source}")]
    InvalidRequest {
        /// Field-level validation failures.
        #[from]
        source: validator::ValidationErrors,
    },

    /// An item-range override does not match the variant's item list.
    #[error("{variant} expects {expected} item ranges, got {found}")]
    ItemRangeMismatch {
        /// Variant whose items were overridden.
        variant: TaskVariant,
        /// Number of configured items.
        expected: usize,
        /// Number of ranges supplied.
        found: usize,
    },

    /// Placement or scene splicing failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Template loading or rendering failed.
    #[error("render error: {source}")]
    Render {
        /// The underlying render error.
        #[from]
        source: RenderError,
    },

    /// Writing generated files failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying output error.
        #[from]
        source: OutputError,
    },

    /// A spliced scene could not be serialized.
    #[error("failed to serialize scene: {source}")]
    SceneSerialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Errors from the output directory.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The target directory exists from an earlier run.
    #[error("output directory {path} already exists")]
    AlreadyExists {
        /// The existing directory.
        path: PathBuf,
    },

    /// Creating a directory or writing a temporary file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Moving a finished temporary file into place failed.
    #[error("failed to persist {path}: {source}")]
    Persist {
        /// Final path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
