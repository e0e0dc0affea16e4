//! Splicing generated layouts into a base scene description.
//!
//! The base scene is an opaque JSON document with a `features` array. Only a
//! handful of well-known positions are written; everything else is carried
//! through untouched:
//!
//! | Feature | Field       | Value                                   |
//! |---------|-------------|-----------------------------------------|
//! | 0       | `pos`       | agent spawn                             |
//! | 1       | `pos2`      | `[map_size + 1, 6, map_size + 1]`       |
//! | 2       | `blockList` | crafting table followed by every tree   |
//! | 3       | `pos2`      | `[map_size + 1, 4, map_size + 1]`       |
//! | 5 (new) | --          | inserted "add items" inventory feature  |

use std::path::Path;

use craftgen_types::{InventoryState, MapLayout, ObjectKind, Placement};
use serde_json::{Value, json};

use crate::error::WorldError;

/// Index at which the inventory feature is inserted.
const INVENTORY_FEATURE_INDEX: usize = 5;

/// Height of the world bounds written to feature 1.
const WORLD_BOUNDS_HEIGHT: u32 = 6;

/// Height of the floor bounds written to feature 3.
const FLOOR_BOUNDS_HEIGHT: u32 = 4;

/// A base scene ready to receive generated layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseScene {
    root: Value,
}

impl BaseScene {
    /// Load a base scene from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SceneIo`] if the file cannot be read and
    /// [`WorldError::SceneJson`] if it is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path).map_err(|source| WorldError::SceneIo {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_str(&contents)?;
        Ok(Self { root })
    }

    /// Wrap an already parsed scene.
    pub const fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Produce a copy of the scene with the layout and inventory written in.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MalformedScene`] if the scene has no `features`
    /// array, has fewer than five features, or one of the written features
    /// is not an object.
    pub fn splice(
        &self,
        layout: &MapLayout,
        inventory: &InventoryState,
    ) -> Result<Value, WorldError> {
        let mut scene = self.root.clone();
        let features = scene
            .get_mut("features")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| WorldError::MalformedScene(String::from("missing `features` array")))?;

        if features.len() < INVENTORY_FEATURE_INDEX {
            return Err(WorldError::MalformedScene(format!(
                "expected at least {INVENTORY_FEATURE_INDEX} features, found {}",
                features.len()
            )));
        }

        let edge = layout.map_size.saturating_add(1);

        set_field(features, 0, "pos", json!(layout.agent.to_array()))?;
        set_field(features, 1, "pos2", json!([edge, WORLD_BOUNDS_HEIGHT, edge]))?;
        set_field(features, 2, "blockList", Value::Array(block_list(layout)))?;
        set_field(features, 3, "pos2", json!([edge, FLOOR_BOUNDS_HEIGHT, edge]))?;
        features.insert(INVENTORY_FEATURE_INDEX, inventory_feature(inventory));

        Ok(scene)
    }
}

/// Overwrite one field of the feature at `index`.
fn set_field(
    features: &mut [Value],
    index: usize,
    key: &str,
    value: Value,
) -> Result<(), WorldError> {
    let feature = features
        .get_mut(index)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| WorldError::MalformedScene(format!("feature {index} is not an object")))?;
    feature.insert(key.to_owned(), value);
    Ok(())
}

fn block(kind: ObjectKind, at: Placement) -> Value {
    json!({
        "blockPos": at.to_array(),
        "blockName": kind.block_name(),
    })
}

/// Crafting table first, then trees in placement order.
fn block_list(layout: &MapLayout) -> Vec<Value> {
    std::iter::once(block(ObjectKind::CraftingTable, layout.crafting_table))
        .chain(layout.trees.iter().map(|t| block(ObjectKind::Tree, *t)))
        .collect()
}

/// The "add items" feature that seeds the agent's inventory.
fn inventory_feature(inventory: &InventoryState) -> Value {
    let items: Vec<Value> = inventory
        .itemized()
        .into_iter()
        .map(|slot| {
            json!({
                "slot": slot.slot,
                "itemDef": {
                    "itemName": slot.item,
                    "itemMeta": 0,
                    "count": slot.count,
                },
            })
        })
        .collect();

    json!({
        "pos": [3, 4, 6],
        "name": "Add Items 1",
        "color": -256,
        "type": "ADD_ITEMS",
        "canProceed": false,
        "isDone": false,
        "completionTime": 0,
        "uuid": "b6ae0b79-e683-4c8a-b33c-39659562c617",
        "itemList": items,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use craftgen_types::ItemCount;

    use super::*;

    fn base() -> Value {
        json!({
            "name": "crafting arena",
            "features": [
                {"type": "START_TIME", "pos": [0, 0, 0]},
                {"type": "PLACE_WALLS", "pos": [0, 4, 0], "pos2": [0, 0, 0]},
                {"type": "PLACE_BLOCKS", "blockList": []},
                {"type": "PLACE_FLOOR", "pos": [0, 3, 0], "pos2": [0, 0, 0]},
                {"type": "TELEPORT"},
                {"type": "END"},
            ]
        })
    }

    fn layout() -> MapLayout {
        MapLayout {
            map_size: 8,
            crafting_table: Placement::ground(3, 2),
            agent: Placement::ground(6, 5),
            trees: vec![Placement::ground(5, 2), Placement::ground(7, 3)],
        }
    }

    fn inventory() -> InventoryState {
        InventoryState::new(vec![
            ItemCount {
                id: "minecraft:log".to_owned(),
                name: "log".to_owned(),
                count: 0,
            },
            ItemCount {
                id: "minecraft:planks".to_owned(),
                name: "planks".to_owned(),
                count: 4,
            },
        ])
    }

    #[test]
    fn splice_writes_well_known_positions() {
        let scene = BaseScene::from_value(base()).splice(&layout(), &inventory()).unwrap();
        let features = scene["features"].as_array().unwrap();

        assert_eq!(features.len(), 7);
        assert_eq!(features[0]["pos"], json!([6, 4, 5]));
        assert_eq!(features[1]["pos2"], json!([9, 6, 9]));
        assert_eq!(features[3]["pos2"], json!([9, 4, 9]));
        assert_eq!(scene["name"], json!("crafting arena"));

        let blocks = features[2]["blockList"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0]["blockName"], json!("minecraft:crafting_table"));
        assert_eq!(blocks[0]["blockPos"], json!([3, 4, 2]));
        assert_eq!(blocks[2]["blockName"], json!("tree"));
        assert_eq!(blocks[2]["blockPos"], json!([7, 4, 3]));
    }

    #[test]
    fn inventory_feature_lists_only_non_zero_items() {
        let scene = BaseScene::from_value(base()).splice(&layout(), &inventory()).unwrap();
        let feature = &scene["features"][5];
        assert_eq!(feature["type"], json!("ADD_ITEMS"));
        let items = feature["itemList"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["slot"], json!(1));
        assert_eq!(items[0]["itemDef"]["itemName"], json!("minecraft:planks"));
        assert_eq!(items[0]["itemDef"]["count"], json!(4));
        // The feature previously at index 5 moves down one place.
        assert_eq!(scene["features"][6]["type"], json!("END"));
    }

    #[test]
    fn splice_leaves_base_untouched() {
        let scene = BaseScene::from_value(base());
        let _ = scene.splice(&layout(), &inventory()).unwrap();
        assert_eq!(scene, BaseScene::from_value(base()));
    }

    #[test]
    fn short_feature_list_is_malformed() {
        let scene = BaseScene::from_value(json!({"features": [{}, {}, {}]}));
        assert!(matches!(
            scene.splice(&layout(), &inventory()),
            Err(WorldError::MalformedScene(_))
        ));
    }

    #[test]
    fn missing_features_is_malformed() {
        let scene = BaseScene::from_value(json!({"name": "empty"}));
        assert!(matches!(
            scene.splice(&layout(), &inventory()),
            Err(WorldError::MalformedScene(_))
        ));
    }

    #[test]
    fn from_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            BaseScene::from_file(&path),
            Err(WorldError::SceneJson { .. })
        ));
        assert!(matches!(
            BaseScene::from_file(&dir.path().join("missing.json")),
            Err(WorldError::SceneIo { .. })
        ));
    }
}
