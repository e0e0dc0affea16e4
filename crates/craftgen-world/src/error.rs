//! Error types for the `craftgen-world` crate.
//!
//! Placement itself never fails once the engine is built; errors come from
//! an invalid map size or from a base scene that does not have the expected
//! shape.

use std::path::PathBuf;

/// Errors that can occur while building layouts or splicing scenes.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested map is smaller than the placement window allows.
    #[error("map size {size} is below the minimum of {min}")]
    MapTooSmall {
        /// Requested side length.
        size: u32,
        /// Smallest accepted side length.
        min: u32,
    },

    /// The base scene file could not be read.
    #[error("failed to read base scene {path}: {source}")]
    SceneIo {
        /// Path of the scene file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The base scene is not valid JSON.
    #[error("failed to parse base scene: {source}")]
    SceneJson {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The base scene is missing a field the splicer writes into.
    #[error("malformed base scene: {0}")]
    MalformedScene(String),
}
