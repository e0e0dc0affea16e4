//! Batch driver: generates a full dataset of distinct problem instances.
//!
//! # Per-attempt flow
//!
//! 1. The placement engine draws a layout (table, agent, trees).
//! 2. The inventory sampler draws one count per configured item.
//! 3. The deduplicator checks the instance signature. A repeat is discarded
//!    and the attempt is retried without advancing the instance index.
//! 4. An accepted instance is rendered and its files are written together.
//!
//! The loop runs until the requested number of instances is accepted. There
//! is no cap on duplicate retries; a warning is logged every
//! [`DUPLICATE_WARN_INTERVAL`] consecutive duplicates instead.

use craftgen_render::{ProblemRenderer, ProblemView, RenderMode};
use craftgen_types::{InventoryState, ItemSpec, MapLayout, TaskVariant};
use craftgen_world::{BaseScene, PlacementEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::GeneratorConfig;
use crate::dedup::{Deduplicator, SignatureMode};
use crate::error::CoreError;
use crate::inventory::sample_inventory;
use crate::output::{OutputDir, OutputFile};

/// Consecutive duplicates between warnings.
pub const DUPLICATE_WARN_INTERVAL: u64 = 10_000;

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct BatchRequest {
    /// Task variant (item list, templates, output sub-directory).
    pub variant: TaskVariant,

    /// Side length of the square map.
    #[validate(range(min = 6))]
    pub map_size: u32,

    /// Number of distinct instances to produce.
    #[validate(range(min = 1))]
    pub count: u32,

    /// Seed for the batch random number generator.
    pub seed: u64,

    /// Produce only basic renderings.
    pub basic_only: bool,
}

/// Outcome of a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Instances written.
    pub accepted: u32,
    /// Candidates discarded as duplicates.
    pub duplicates_discarded: u64,
    /// Accepted layouts whose tree list was cut short by placement exhaustion.
    pub truncated_layouts: u64,
    /// Seed the batch was generated from.
    pub rng_seed: u64,
}

/// Drives generation of one batch.
pub struct BatchGenerator {
    request: BatchRequest,
    items: Vec<ItemSpec>,
    engine: PlacementEngine,
    renderer: ProblemRenderer,
    scene: Option<BaseScene>,
    dedup: Deduplicator,
}

impl BatchGenerator {
    /// Prepare a batch.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRequest`] if the request fails validation
    /// and [`CoreError::World`] if the map size is rejected by the engine.
    pub fn new(
        request: BatchRequest,
        items: Vec<ItemSpec>,
        renderer: ProblemRenderer,
        scene: Option<BaseScene>,
    ) -> Result<Self, CoreError> {
        request.validate()?;
        let engine = PlacementEngine::new(request.map_size)?;
        let mode = if request.basic_only || renderer.mode() == RenderMode::BasicOnly {
            SignatureMode::Aggregate
        } else {
            SignatureMode::Full
        };
        Ok(Self {
            request,
            items,
            engine,
            renderer,
            scene,
            dedup: Deduplicator::new(mode),
        })
    }

    /// Generate every instance into `output`.
    ///
    /// Instance `i` is named `instance_<i>`, with indices contiguous from 0.
    ///
    /// # Errors
    ///
    /// Returns the first rendering, scene, or write failure. Instances
    /// written before the failure stay on disk.
    pub fn run(
        &mut self,
        output: &OutputDir,
        rng: &mut impl Rng,
    ) -> Result<BatchSummary, CoreError> {
        let mut summary = BatchSummary {
            accepted: 0,
            duplicates_discarded: 0,
            truncated_layouts: 0,
            rng_seed: self.request.seed,
        };
        let mut consecutive_duplicates: u64 = 0;

        info!(
            variant = %self.request.variant,
            map_size = self.request.map_size,
            count = self.request.count,
            max_trees = self.engine.max_trees(),
            dir = %output.path().display(),
            "batch started"
        );

        while summary.accepted < self.request.count {
            let report = self.engine.generate(rng);
            let inventory = sample_inventory(&self.items, rng);

            let signature = self.dedup.signature(&report.layout, &inventory);
            if !self.dedup.check_and_record(signature) {
                summary.duplicates_discarded = summary.duplicates_discarded.saturating_add(1);
                consecutive_duplicates = consecutive_duplicates.saturating_add(1);
                debug!(
                    index = summary.accepted,
                    consecutive = consecutive_duplicates,
                    "duplicate instance discarded"
                );
                if consecutive_duplicates.checked_rem(DUPLICATE_WARN_INTERVAL) == Some(0) {
                    warn!(
                        consecutive = consecutive_duplicates,
                        accepted = summary.accepted,
                        requested = self.request.count,
                        "many consecutive duplicates; the instance space may be nearly exhausted"
                    );
                }
                continue;
            }
            consecutive_duplicates = 0;

            if report.exhausted {
                summary.truncated_layouts = summary.truncated_layouts.saturating_add(1);
                debug!(
                    index = summary.accepted,
                    requested = report.requested_trees,
                    placed = report.layout.tree_count(),
                    "tree list truncated"
                );
            }

            self.write_instance(output, summary.accepted, &report.layout, &inventory)?;
            summary.accepted = summary.accepted.saturating_add(1);
        }

        info!(
            accepted = summary.accepted,
            duplicates_discarded = summary.duplicates_discarded,
            truncated_layouts = summary.truncated_layouts,
            rng_seed = summary.rng_seed,
            signatures = self.dedup.len(),
            "batch complete"
        );
        Ok(summary)
    }

    /// Render and write every file for instance `index`.
    fn write_instance(
        &self,
        output: &OutputDir,
        index: u32,
        layout: &MapLayout,
        inventory: &InventoryState,
    ) -> Result<(), CoreError> {
        let view = ProblemView::build(&format!("instance_{index}"), layout, inventory)?;
        let problem = self.renderer.render(&view)?;

        let mut files = vec![OutputFile::new(
            format!("basic_map_instance_{index}.pddl"),
            problem.basic,
        )];
        if let Some(advanced) = problem.advanced.filter(|_| !self.request.basic_only) {
            files.push(OutputFile::new(
                format!("advanced_map_instance_{index}.pddl"),
                advanced,
            ));
        }
        if let Some(scene) = &self.scene {
            let spliced = scene.splice(layout, inventory)?;
            files.push(OutputFile::new(
                format!("map_instance_{index}.json"),
                serde_json::to_string_pretty(&spliced)?,
            ));
        }

        output.write_instance(&files)?;
        debug!(
            instance = %problem.instance_name,
            files = files.len(),
            trees = layout.tree_count(),
            "instance written"
        );
        Ok(())
    }
}

/// Generate a dataset end to end from configuration and a request.
///
/// Templates and the optional base scene are loaded first. The output
/// directory `<output_root>/<variant>/<n>X<n>` (or `.../basic`) is then
/// created and must not already exist. The batch RNG is seeded from
/// `request.seed`.
///
/// # Errors
///
/// Returns [`CoreError`] for an invalid request or item ranges, unreadable
/// templates or scene, an existing output directory, or any failure while
/// generating.
pub fn generate_dataset(
    config: &GeneratorConfig,
    request: BatchRequest,
    item_ranges: Option<&[u32]>,
) -> Result<BatchSummary, CoreError> {
    request.validate()?;
    let items = config.resolve_items(request.variant, item_ranges)?;

    let mode = if request.basic_only {
        RenderMode::BasicOnly
    } else {
        RenderMode::Full
    };
    let renderer = ProblemRenderer::load(&config.templates_dir, request.variant, mode)?;
    let scene = config
        .base_map
        .as_deref()
        .map(BaseScene::from_file)
        .transpose()?;

    let dir = OutputDir::path_for(
        &config.output_root,
        request.variant,
        request.map_size,
        request.basic_only,
    );
    let output = OutputDir::create(&dir)?;

    let mut rng = StdRng::seed_from_u64(request.seed);
    let mut generator = BatchGenerator::new(request, items, renderer, scene)?;
    generator.run(&output, &mut rng)
}
