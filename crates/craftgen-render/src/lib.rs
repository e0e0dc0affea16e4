//! Planning-problem rendering for craftgen.
//!
//! Turns an accepted layout and inventory into two textual problem
//! descriptions through external `minijinja` templates: a basic one with
//! aggregate counts, and an advanced one enumerating every grid cell.
//!
//! # Modules
//!
//! - [`error`] -- Error types for template loading and rendering.
//! - [`view`] -- [`ProblemView`], the shared values behind both renderings.
//! - [`renderer`] -- [`ProblemRenderer`], template loading and substitution.

pub mod error;
pub mod renderer;
pub mod view;

// Re-export primary types at crate root.
pub use error::RenderError;
pub use renderer::{
    ADVANCED_TEMPLATE_FILE, BASIC_TEMPLATE_FILE, ProblemRenderer, RenderMode, RenderedProblem,
};
pub use view::{AdvancedContext, BasicContext, ProblemView, RenderedCount};
