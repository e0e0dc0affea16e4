//! Configuration loading for the dataset generator.
//!
//! Configuration lives in an optional `craftgen-config.yaml`. Every field has
//! a default, so an empty file (or no file) yields the stock wooden-sword and
//! pogo-stick item lists with seed 63.

use std::path::{Path, PathBuf};

use craftgen_types::{ItemSpec, TaskVariant};
use serde::Deserialize;

use crate::error::CoreError;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "craftgen-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the batch random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Root under which `<variant>/<n>X<n>` directories are created.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Directory holding one template sub-directory per variant.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Base scene JSON to splice layouts into. No scene files when unset.
    #[serde(default)]
    pub base_map: Option<PathBuf>,

    /// Per-variant item lists.
    #[serde(default)]
    pub variants: VariantsConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            output_root: default_output_root(),
            templates_dir: default_templates_dir(),
            base_map: None,
            variants: VariantsConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Items configured for `variant`.
    pub fn items(&self, variant: TaskVariant) -> &[ItemSpec] {
        &self.variants.get(variant).items
    }

    /// Items for `variant`, with upper bounds optionally replaced.
    ///
    /// `ranges` is positional: the n-th value bounds the n-th item.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ItemRangeMismatch`] if `ranges` does not have
    /// one value per configured item.
    pub fn resolve_items(
        &self,
        variant: TaskVariant,
        ranges: Option<&[u32]>,
    ) -> Result<Vec<ItemSpec>, CoreError> {
        let items = self.items(variant);
        let Some(ranges) = ranges else {
            return Ok(items.to_vec());
        };
        if ranges.len() != items.len() {
            return Err(CoreError::ItemRangeMismatch {
                variant,
                expected: items.len(),
                found: ranges.len(),
            });
        }
        Ok(items
            .iter()
            .zip(ranges)
            .map(|(item, max)| ItemSpec {
                max: *max,
                ..item.clone()
            })
            .collect())
    }
}

/// Item lists for every task variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantsConfig {
    /// Wooden-sword task.
    #[serde(default = "default_wooden_sword")]
    pub wooden_sword: VariantConfig,

    /// Pogo-stick task.
    #[serde(default = "default_pogo_stick")]
    pub pogo_stick: VariantConfig,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            wooden_sword: default_wooden_sword(),
            pogo_stick: default_pogo_stick(),
        }
    }
}

impl VariantsConfig {
    /// Configuration for one variant.
    pub const fn get(&self, variant: TaskVariant) -> &VariantConfig {
        match variant {
            TaskVariant::WoodenSword => &self.wooden_sword,
            TaskVariant::PogoStick => &self.pogo_stick,
        }
    }
}

/// Configuration for a single task variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantConfig {
    /// Ordered inventory items. Position in the list is the inventory slot.
    pub items: Vec<ItemSpec>,
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    63
}

fn default_output_root() -> PathBuf {
    PathBuf::from("dataset")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_wooden_sword() -> VariantConfig {
    VariantConfig {
        items: vec![
            ItemSpec::new("minecraft:log", "log", 8),
            ItemSpec::new("minecraft:planks", "planks", 8),
            ItemSpec::new("minecraft:stick", "stick", 0),
            ItemSpec::new("minecraft:wooden_sword", "wooden_sword", 0),
        ],
    }
}

fn default_pogo_stick() -> VariantConfig {
    VariantConfig {
        items: vec![
            ItemSpec::new("minecraft:log", "log", 8),
            ItemSpec::new("minecraft:planks", "planks", 8),
            ItemSpec::new("minecraft:stick", "stick", 8),
            ItemSpec::new(
                "polycraft:sack_polyisoprene_pellets",
                "sack_polyisoprene_pellets",
                0,
            ),
            ItemSpec::new("polycraft:tree_tap", "tree_tap", 0),
        ],
    }
}
