//! `craftgen` binary: generates a dataset of crafting planning problems.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Parse command-line arguments
//! 3. Load configuration (`--config`, else `craftgen-config.yaml` if present)
//! 4. Apply command-line overrides
//! 5. Generate the batch and log the summary

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use craftgen_core::{BatchRequest, DEFAULT_CONFIG_FILE, GeneratorConfig, generate_dataset};
use craftgen_types::TaskVariant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Task variant as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Craft a wooden sword.
    WoodenSword,
    /// Craft a wooden pogo stick.
    PogoStick,
}

impl From<VariantArg> for TaskVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::WoodenSword => Self::WoodenSword,
            VariantArg::PogoStick => Self::PogoStick,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "craftgen")]
#[command(about = "Generate paired basic/advanced crafting planning problems")]
struct Args {
    /// Side length of the square map (at least 6)
    #[arg(long)]
    map_size: u32,

    /// Number of distinct instances to generate
    #[arg(long)]
    count: u32,

    /// Task variant
    #[arg(long, value_enum)]
    variant: VariantArg,

    /// Random seed (defaults to the configured seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file (defaults to craftgen-config.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root directory for generated datasets
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Directory holding per-variant problem templates
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Inclusive upper bound per item, in configured order (e.g. 8,8,0,0)
    #[arg(long, value_delimiter = ',')]
    items_range: Option<Vec<u32>>,

    /// Base scene JSON to splice each layout into
    #[arg(long)]
    base_map: Option<PathBuf>,

    /// Generate only basic problems
    #[arg(long)]
    basic_only: bool,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or generation fails.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    info!("craftgen starting");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(output_root) = args.output_root {
        config.output_root = output_root;
    }
    if let Some(templates_dir) = args.templates_dir {
        config.templates_dir = templates_dir;
    }
    if let Some(base_map) = args.base_map {
        config.base_map = Some(base_map);
    }
    info!(
        seed = config.seed,
        output_root = %config.output_root.display(),
        templates_dir = %config.templates_dir.display(),
        base_map = ?config.base_map,
        "Configuration loaded"
    );

    let request = BatchRequest {
        variant: args.variant.into(),
        map_size: args.map_size,
        count: args.count,
        seed: args.seed.unwrap_or(config.seed),
        basic_only: args.basic_only,
    };

    let summary = generate_dataset(&config, request, args.items_range.as_deref())
        .context("dataset generation failed")?;

    info!(
        accepted = summary.accepted,
        duplicates_discarded = summary.duplicates_discarded,
        truncated_layouts = summary.truncated_layouts,
        rng_seed = summary.rng_seed,
        "craftgen finished"
    );
    Ok(())
}

/// Load configuration from `path`, or from the default file if it exists.
fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                info!("no config file found, using defaults");
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };
    GeneratorConfig::from_file(path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
