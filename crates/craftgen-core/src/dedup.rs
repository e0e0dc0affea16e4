//! Batch-wide instance deduplication.

use std::collections::BTreeSet;

use craftgen_types::{InstanceSignature, InventoryState, MapLayout};

/// Which instance fields take part in the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMode {
    /// Full layout plus itemized inventory.
    Full,
    /// Tree count plus itemized inventory, for basic-only batches.
    Aggregate,
}

/// Remembers every signature accepted in the current batch.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    mode: SignatureMode,
    seen: BTreeSet<InstanceSignature>,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    pub const fn new(mode: SignatureMode) -> Self {
        Self {
            mode,
            seen: BTreeSet::new(),
        }
    }

    /// Compute the signature of a candidate instance under this mode.
    pub fn signature(&self, layout: &MapLayout, inventory: &InventoryState) -> InstanceSignature {
        match self.mode {
            SignatureMode::Full => InstanceSignature::full(layout, inventory),
            SignatureMode::Aggregate => InstanceSignature::aggregate(layout, inventory),
        }
    }

    /// Record `signature` if it is new.
    ///
    /// Returns `false` when the signature was already seen, in which case
    /// the set is unchanged and the candidate should be discarded.
    pub fn check_and_record(&mut self, signature: InstanceSignature) -> bool {
        self.seen.insert(signature)
    }

    /// Number of distinct signatures recorded.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
