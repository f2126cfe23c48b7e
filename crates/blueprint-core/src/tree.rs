//! The annotated blueprint tree delivered by the item service.
//!
//! A [`BlueprintNode`] is built upstream by the blueprint-tree query: the
//! builder stops at a maximum depth and refuses to revisit ancestors, so the
//! tree is always finite. Nodes it truncated carry `max_depth_reached` or
//! `cycle_detected` and simply have no children here.
//!
//! All walks in this module use explicit work-lists; nothing recurses on
//! the tree depth, including cloning, comparing, and dropping it. `Debug`
//! and serde still recurse, so printing or serializing is limited by the
//! call stack.

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, ItemType};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The item a node stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub internal_name: String,
    pub item_type: ItemType,
}

/// Production rule summary for a producible item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintInfo {
    pub bake_time_ms: u64,
}

/// One node of a pre-built blueprint tree.
///
/// `component_ratios[i]` is the number of units of `component_nodes[i]`
/// output per one unit of this node's output.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BlueprintNode {
    /// Absent only on malformed input; the aggregator rejects such nodes.
    #[serde(default)]
    pub item: Option<ItemRef>,
    #[serde(default)]
    pub blueprint: Option<BlueprintInfo>,
    #[serde(default)]
    pub total_bake_time_ms: u64,
    #[serde(default)]
    pub component_nodes: Vec<BlueprintNode>,
    #[serde(default)]
    pub component_ratios: Vec<f64>,
    #[serde(default)]
    pub max_depth_reached: bool,
    #[serde(default)]
    pub cycle_detected: bool,
}

impl BlueprintNode {
    /// A node for `item` with no blueprint and no components.
    pub fn leaf(item: ItemRef) -> Self {
        Self {
            item: Some(item),
            blueprint: None,
            total_bake_time_ms: 0,
            component_nodes: Vec::new(),
            component_ratios: Vec::new(),
            max_depth_reached: false,
            cycle_detected: false,
        }
    }

    /// Copy of every field except the children.
    fn shallow_copy(&self) -> Self {
        Self {
            item: self.item.clone(),
            blueprint: self.blueprint.clone(),
            total_bake_time_ms: self.total_bake_time_ms,
            component_nodes: Vec::new(),
            component_ratios: self.component_ratios.clone(),
            max_depth_reached: self.max_depth_reached,
            cycle_detected: self.cycle_detected,
        }
    }

    /// Whether every field except the children matches, including the
    /// number of children.
    fn shallow_eq(&self, other: &Self) -> bool {
        self.item == other.item
            && self.blueprint == other.blueprint
            && self.total_bake_time_ms == other.total_bake_time_ms
            && self.component_ratios == other.component_ratios
            && self.max_depth_reached == other.max_depth_reached
            && self.cycle_detected == other.cycle_detected
            && self.component_nodes.len() == other.component_nodes.len()
    }

    /// Id of this node's item, if present.
    pub fn item_id(&self) -> Option<ItemId> {
        self.item.as_ref().map(|item| item.id)
    }

    /// Whether the item has a blueprint (can be produced).
    pub fn is_producible(&self) -> bool {
        self.blueprint.is_some()
    }

    /// Whether the builder cut this node's subtree short.
    pub fn is_truncated(&self) -> bool {
        self.max_depth_reached || self.cycle_detected
    }

    /// Components paired with their ratios, in order.
    ///
    /// Stops at the shorter of the two lists; the aggregator checks that
    /// they match before relying on this.
    pub fn components(&self) -> impl Iterator<Item = (f64, &BlueprintNode)> {
        self.component_ratios
            .iter()
            .copied()
            .zip(self.component_nodes.iter())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.component_nodes.iter());
        }
        count
    }

    /// Number of edges on the longest root-to-leaf path. A leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in &node.component_nodes {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Items whose subtree the builder truncated, in pre-order.
    pub fn truncated_items(&self) -> Vec<&ItemRef> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_truncated()
                && let Some(item) = &node.item
            {
                found.push(item);
            }
            stack.extend(node.component_nodes.iter().rev());
        }
        found
    }
}

enum CloneStep<'a> {
    Enter(&'a BlueprintNode),
    Exit(&'a BlueprintNode),
}

impl Clone for BlueprintNode {
    fn clone(&self) -> Self {
        // Post-order: a node is assembled once its children sit on top of
        // `built`, in their original order.
        let mut steps = vec![CloneStep::Enter(self)];
        let mut built: Vec<BlueprintNode> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                CloneStep::Enter(node) => {
                    steps.push(CloneStep::Exit(node));
                    steps.extend(node.component_nodes.iter().rev().map(CloneStep::Enter));
                }
                CloneStep::Exit(node) => {
                    let mut copy = node.shallow_copy();
                    let first_child = built.len() - node.component_nodes.len();
                    copy.component_nodes = built.split_off(first_child);
                    built.push(copy);
                }
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl PartialEq for BlueprintNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((left, right)) = pairs.pop() {
            if !left.shallow_eq(right) {
                return false;
            }
            pairs.extend(left.component_nodes.iter().zip(&right.component_nodes));
        }
        true
    }
}

impl Drop for BlueprintNode {
    fn drop(&mut self) {
        // Unlink children onto a heap stack so deep chains drop in a loop.
        let mut pending = std::mem::take(&mut self.component_nodes);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.component_nodes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
