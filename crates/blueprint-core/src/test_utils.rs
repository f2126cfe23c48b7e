//! Shared tree builders for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::id::{ItemId, ItemType};
use crate::tree::{BlueprintInfo, BlueprintNode, ItemRef};

/// Bake time given to every node built with [`producible`].
pub const TEST_BAKE_TIME_MS: u64 = 1_000;

// ===========================================================================
// Node constructors
// ===========================================================================

pub fn item(id: i64, name: &str, item_type: ItemType) -> ItemRef {
    ItemRef {
        id: ItemId(id),
        internal_name: name.to_string(),
        item_type,
    }
}

/// A raw material with no blueprint.
pub fn raw(id: i64, name: &str) -> BlueprintNode {
    BlueprintNode::leaf(item(id, name, ItemType::RAW_MATERIAL))
}

/// A producible node consuming `components` as `(ratio, child)` pairs.
/// `total_bake_time_ms` is filled in the way the tree builder does.
pub fn producible(item: ItemRef, components: Vec<(f64, BlueprintNode)>) -> BlueprintNode {
    let mut node = BlueprintNode::leaf(item);
    node.blueprint = Some(BlueprintInfo {
        bake_time_ms: TEST_BAKE_TIME_MS,
    });
    node.total_bake_time_ms = TEST_BAKE_TIME_MS;
    for (ratio, child) in components {
        node.total_bake_time_ms += child.total_bake_time_ms;
        node.component_ratios.push(ratio);
        node.component_nodes.push(child);
    }
    node
}

// ===========================================================================
// Canned trees
// ===========================================================================

pub fn sword_id() -> ItemId {
    ItemId(100)
}

pub fn iron_ingot_id() -> ItemId {
    ItemId(200)
}

/// Sword <- Iron Ingot at ratio 0.5 (two ingots per sword).
pub fn sword_tree() -> BlueprintNode {
    producible(
        item(sword_id().0, "Sword", ItemType::WEAPON),
        vec![(
            0.5,
            BlueprintNode::leaf(item(
                iron_ingot_id().0,
                "Iron Ingot",
                ItemType::REFINED_MATERIAL,
            )),
        )],
    )
}

/// A linear chain of `depth` components below a root with id 0; node `n`
/// has id `n` and every link uses `ratio`. Built bottom-up without
/// recursion so it can be arbitrarily deep.
pub fn chain(depth: usize, ratio: f64) -> BlueprintNode {
    let mut current = raw(depth as i64, &format!("link_{depth}"));
    for id in (0..depth).rev() {
        current = producible(
            item(id as i64, &format!("link_{id}"), ItemType::REFINED_MATERIAL),
            vec![(ratio, current)],
        );
    }
    current
}

/// A root with `width` distinct raw components, each at ratio 1.
pub fn wide(width: usize) -> BlueprintNode {
    let components = (1..=width)
        .map(|id| (1.0, raw(id as i64, &format!("raw_{id}"))))
        .collect();
    producible(item(0, "wide_root", ItemType::CONTAINER), components)
}
