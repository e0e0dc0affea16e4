//! Problem template loading and rendering via `minijinja`.
//!
//! Each task variant ships two templates under
//! `<templates_dir>/<variant>/`: `basic.pddl.j2` (aggregate counts only) and
//! `advanced.pddl.j2` (full cell topology). Templates are read from disk so
//! the problem text can be tuned without recompiling.
//!
//! Rendering is pure substitution. Undefined names are an error, and at load
//! time every placeholder the renderer provides must appear in the template
//! it is meant for.

use std::path::Path;

use craftgen_types::TaskVariant;
use minijinja::{Environment, UndefinedBehavior};
use tracing::debug;

use crate::error::RenderError;
use crate::view::{ADVANCED_PLACEHOLDERS, BASIC_PLACEHOLDERS, ProblemView};

/// File name of the basic template inside a variant directory.
pub const BASIC_TEMPLATE_FILE: &str = "basic.pddl.j2";

/// File name of the advanced template inside a variant directory.
pub const ADVANCED_TEMPLATE_FILE: &str = "advanced.pddl.j2";

const BASIC: &str = "basic";
const ADVANCED: &str = "advanced";

/// Which renderings to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Basic and advanced renderings.
    Full,
    /// Basic rendering only.
    BasicOnly,
}

/// Both textual artifacts for one accepted instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProblem {
    /// Problem name, e.g. `instance_3`.
    pub instance_name: String,
    /// Aggregate-count problem text.
    pub basic: String,
    /// Cell-topology problem text. `None` in [`RenderMode::BasicOnly`].
    pub advanced: Option<String>,
}

/// Renders problem instances from loaded templates.
pub struct ProblemRenderer {
    env: Environment<'static>,
    mode: RenderMode,
}

impl ProblemRenderer {
    /// Load the templates for `variant` from `templates_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateIo`] if a template file is missing,
    /// [`RenderError::Template`] if it fails to compile, and
    /// [`RenderError::MissingPlaceholder`] if it ignores a provided value.
    pub fn load(
        templates_dir: &Path,
        variant: TaskVariant,
        mode: RenderMode,
    ) -> Result<Self, RenderError> {
        let dir = templates_dir.join(variant.dir_name());
        let basic = read_template(&dir.join(BASIC_TEMPLATE_FILE))?;
        let advanced = match mode {
            RenderMode::Full => Some(read_template(&dir.join(ADVANCED_TEMPLATE_FILE))?),
            RenderMode::BasicOnly => None,
        };
        debug!(dir = %dir.display(), ?mode, "problem templates read");
        Self::from_sources(basic, advanced)
    }

    /// Build a renderer from template sources.
    ///
    /// Passing `None` for `advanced` yields a basic-only renderer.
    ///
    /// # Errors
    ///
    /// Same as [`ProblemRenderer::load`], minus file access.
    pub fn from_sources(basic: String, advanced: Option<String>) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_template_owned(BASIC, basic)
            .map_err(|source| RenderError::Template { name: BASIC, source })?;
        check_placeholders(&env, BASIC, BASIC_PLACEHOLDERS)?;

        let mode = match advanced {
            Some(source_text) => {
                env.add_template_owned(ADVANCED, source_text)
                    .map_err(|source| RenderError::Template {
                        name: ADVANCED,
                        source,
                    })?;
                check_placeholders(&env, ADVANCED, ADVANCED_PLACEHOLDERS)?;
                RenderMode::Full
            }
            None => RenderMode::BasicOnly,
        };

        Ok(Self { env, mode })
    }

    /// Which renderings this renderer produces.
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render the basic problem text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if rendering fails.
    pub fn render_basic(&self, view: &ProblemView) -> Result<String, RenderError> {
        self.env
            .get_template(BASIC)
            .and_then(|t| t.render(view.basic_context()))
            .map_err(|source| RenderError::Template { name: BASIC, source })
    }

    /// Render the advanced problem text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoAdvancedTemplate`] for a basic-only renderer
    /// and [`RenderError::Template`] if rendering fails.
    pub fn render_advanced(&self, view: &ProblemView) -> Result<String, RenderError> {
        if self.mode == RenderMode::BasicOnly {
            return Err(RenderError::NoAdvancedTemplate);
        }
        self.env
            .get_template(ADVANCED)
            .and_then(|t| t.render(view.advanced_context()))
            .map_err(|source| RenderError::Template {
                name: ADVANCED,
                source,
            })
    }

    /// Render every artifact for one instance.
    ///
    /// Nothing is returned unless all renderings succeed.
    ///
    /// # Errors
    ///
    /// Propagates the first rendering failure.
    pub fn render(&self, view: &ProblemView) -> Result<RenderedProblem, RenderError> {
        let basic = self.render_basic(view)?;
        let advanced = match self.mode {
            RenderMode::Full => Some(self.render_advanced(view)?),
            RenderMode::BasicOnly => None,
        };
        Ok(RenderedProblem {
            instance_name: view.instance_name.clone(),
            basic,
            advanced,
        })
    }
}

/// Read a template file from disk.
fn read_template(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::TemplateIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Every provided placeholder must be referenced by the template.
fn check_placeholders(
    env: &Environment<'static>,
    name: &'static str,
    provided: &[&'static str],
) -> Result<(), RenderError> {
    let template = env
        .get_template(name)
        .map_err(|source| RenderError::Template { name, source })?;
    let used = template.undeclared_variables(false);
    for &placeholder in provided {
        if !used.contains(placeholder) {
            return Err(RenderError::MissingPlaceholder {
                template: name,
                placeholder,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftgen_types::{InventoryState, ItemCount, MapLayout, Placement};

    use super::*;

    const BASIC_SRC: &str = "(define (problem {{ instance_name }})\n\
        (= (trees_in_map) {{ trees_in_map }})\n\
        {% for item in inventory %}(= (count_{{ item.name }}_in_inventory) {{ item.count }})\n{% endfor %})\n";

    const ADVANCED_SRC: &str = "(define (problem {{ instance_name }}) ; {{ cell_count }}\n\
        table cell{{ crafting_table_cell }}\n\
        objects {% for c in cells %}cell{{ c }}{% if not loop.last %} {% endif %}{% endfor %}\n\
        (position cell{{ agent_cell }})\n\
        {% for c in air_cells %}(air_cell cell{{ c }}){% endfor %}\n\
        {% for c in tree_cells %}(tree_cell cell{{ c }}){% endfor %}\n\
        {% for item in inventory %}(= (count_{{ item.name }}_in_inventory) {{ item.count }})\n{% endfor %})\n";

    fn view() -> ProblemView {
        let layout = MapLayout {
            map_size: 6,
            crafting_table: Placement::ground(2, 2),
            agent: Placement::ground(5, 4),
            trees: vec![Placement::ground(4, 2)],
        };
        let inventory = InventoryState::new(vec![
            ItemCount {
                id: "minecraft:log".to_owned(),
                name: "log".to_owned(),
                count: 5,
            },
            ItemCount {
                id: "minecraft:wooden_sword".to_owned(),
                name: "wooden_sword".to_owned(),
                count: 0,
            },
        ]);
        ProblemView::build("instance_4", &layout, &inventory).unwrap()
    }

    #[test]
    fn renders_basic_counts() {
        let renderer =
            ProblemRenderer::from_sources(BASIC_SRC.to_owned(), Some(ADVANCED_SRC.to_owned()))
                .unwrap();
        let basic = renderer.render_basic(&view()).unwrap();
        assert!(basic.contains("(problem instance_4)"));
        assert!(basic.contains("(= (trees_in_map) 1)"));
        assert!(basic.contains("(= (count_log_in_inventory) 5)"));
        assert!(basic.contains("(= (count_wooden_sword_in_inventory) 0)"));
    }

    #[test]
    fn renders_advanced_topology() {
        let renderer =
            ProblemRenderer::from_sources(BASIC_SRC.to_owned(), Some(ADVANCED_SRC.to_owned()))
                .unwrap();
        let advanced = renderer.render_advanced(&view()).unwrap();
        assert!(advanced.contains("; 36"));
        assert!(advanced.contains("table cell7"));
        assert!(advanced.contains("objects cell0 cell1 cell2 cell3 cell4 cell5 cell6 cell8"));
        assert!(!advanced.contains(" cell7 "));
        assert!(advanced.contains("(position cell22)"));
        assert!(advanced.contains("(tree_cell cell9)"));
        assert!(!advanced.contains("(air_cell cell9)"));
        assert!(!advanced.contains("(air_cell cell7)"));
        assert!(advanced.contains("(= (count_log_in_inventory) 5)"));
    }

    #[test]
    fn basic_only_renderer_skips_advanced() {
        let renderer = ProblemRenderer::from_sources(BASIC_SRC.to_owned(), None).unwrap();
        assert_eq!(renderer.mode(), RenderMode::BasicOnly);
        let problem = renderer.render(&view()).unwrap();
        assert!(problem.advanced.is_none());
        assert!(matches!(
            renderer.render_advanced(&view()),
            Err(RenderError::NoAdvancedTemplate)
        ));
    }

    #[test]
    fn template_ignoring_a_placeholder_is_rejected() {
        let src = "(define (problem {{ instance_name }}) {{ trees_in_map }})".to_owned();
        assert!(matches!(
            ProblemRenderer::from_sources(src, None),
            Err(RenderError::MissingPlaceholder {
                template: "basic",
                placeholder: "inventory",
            })
        ));
    }

    #[test]
    fn unknown_placeholder_fails_to_render() {
        let src = format!("{BASIC_SRC}{{{{ goal_item }}}}");
        let renderer = ProblemRenderer::from_sources(src, None).unwrap();
        assert!(matches!(
            renderer.render_basic(&view()),
            Err(RenderError::Template { name: "basic", .. })
        ));
    }

    #[test]
    fn load_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProblemRenderer::load(dir.path(), TaskVariant::WoodenSword, RenderMode::Full),
            Err(RenderError::TemplateIo { .. })
        ));
    }

    #[test]
    fn load_reads_variant_directory() {
        let dir = tempfile::tempdir().unwrap();
        let variant_dir = dir.path().join("pogo_stick");
        std::fs::create_dir_all(&variant_dir).unwrap();
        std::fs::write(variant_dir.join(BASIC_TEMPLATE_FILE), BASIC_SRC).unwrap();
        let renderer =
            ProblemRenderer::load(dir.path(), TaskVariant::PogoStick, RenderMode::BasicOnly)
                .unwrap();
        assert_eq!(renderer.mode(), RenderMode::BasicOnly);
    }
}
