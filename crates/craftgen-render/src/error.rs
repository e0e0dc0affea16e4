//! Error types for problem rendering.
//!
//! Uses `thiserror` for typed errors covering template loading, the
//! placeholder contract between renderer and template, and rendering itself.

use std::path::PathBuf;

use craftgen_types::{ObjectKind, Placement};

/// Errors that can occur while loading templates or rendering problems.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template file could not be read.
    #[error("failed to read template {path}: {source}")]
    TemplateIo {
        /// Path of the template file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A template failed to compile or render.
    #[error("template `{name}` failed: {source}")]
    Template {
        /// Logical template name (`basic` or `advanced`).
        name: &'static str,
        /// The underlying template engine error.
        source: minijinja::Error,
    },

    /// A template does not reference a value the renderer provides.
    #[error("template `{template}` does not use placeholder `{placeholder}`")]
    MissingPlaceholder {
        /// Logical template name.
        template: &'static str,
        /// Placeholder the renderer emits.
        placeholder: &'static str,
    },

    /// An advanced rendering was requested from a basic-only renderer.
    #[error("no advanced template loaded")]
    NoAdvancedTemplate,

    /// The map has more cells than a cell index can address.
    #[error("map size {map_size} has too many cells to index")]
    GridTooLarge {
        /// Requested side length.
        map_size: u32,
    },

    /// An object lies outside the grid and has no cell index.
    #[error("{kind:?} at {at} is outside the grid")]
    OutOfGrid {
        /// The offending object.
        kind: ObjectKind,
        /// Its placement.
        at: Placement,
    },
}
