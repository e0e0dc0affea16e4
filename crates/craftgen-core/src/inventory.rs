//! Inventory sampling.

use craftgen_types::{InventoryState, ItemCount, ItemSpec};
use rand::Rng;

/// Draw one count per item, uniformly from `[0, max]`, in list order.
///
/// Zero counts are kept so every configured item appears in the result.
pub fn sample_inventory(items: &[ItemSpec], rng: &mut impl Rng) -> InventoryState {
    let entries = items
        .iter()
        .map(|item| ItemCount {
            id: item.id.clone(),
            name: item.name.clone(),
            count: rng.random_range(0..=item.max),
        })
        .collect();
    InventoryState::new(entries)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn items() -> Vec<ItemSpec> {
        vec![
            ItemSpec::new("minecraft:log", "log", 8),
            ItemSpec::new("minecraft:planks", "planks", 2),
            ItemSpec::new("minecraft:stick", "stick", 0),
        ]
    }

    #[test]
    fn counts_stay_within_bounds() {
        let items = items();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let inventory = sample_inventory(&items, &mut rng);
            for (entry, spec) in inventory.entries().iter().zip(&items) {
                assert_eq!(entry.id, spec.id);
                assert!(entry.count <= spec.max, "seed {seed}: {entry:?}");
            }
        }
    }

    #[test]
    fn zero_bound_always_samples_zero_and_is_kept() {
        let items = items();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let inventory = sample_inventory(&items, &mut rng);
            assert_eq!(inventory.entries().len(), 3);
            assert_eq!(inventory.count("minecraft:stick"), Some(0));
            assert!(
                inventory
                    .itemized()
                    .iter()
                    .all(|slot| slot.item != "minecraft:stick")
            );
        }
    }

    #[test]
    fn both_ends_of_range_are_reachable() {
        let items = vec![ItemSpec::new("minecraft:planks", "planks", 2)];
        let mut rng = StdRng::seed_from_u64(63);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let inventory = sample_inventory(&items, &mut rng);
            let count = inventory.entries()[0].count;
            seen[usize::try_from(count).unwrap_or(0)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn empty_item_list_gives_empty_inventory() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample_inventory(&[], &mut rng).entries().is_empty());
    }
}
