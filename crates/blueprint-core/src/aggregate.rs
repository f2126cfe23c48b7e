//! Material aggregation over a blueprint tree.
//!
//! [`aggregate`] walks the tree depth-first from the root, dividing the
//! demanded quantity by each ratio on the way down and adding every
//! component's demand to a per-item total. Items reached through several
//! branches accumulate every contribution.
//!
//! The walk keeps pending nodes on a heap-allocated stack instead of the
//! call stack, because tree depth is bounded by the upstream builder's
//! settings rather than by anything this crate controls.

use log::{debug, trace, warn};

use crate::id::ItemId;
use crate::material::Materials;
use crate::tree::{BlueprintNode, ItemRef};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort an aggregation run. No partial result is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("invalid ratio {ratio} for component {index} of item {parent}: must be positive and finite")]
    InvalidRatio {
        parent: ItemId,
        index: usize,
        ratio: f64,
    },

    #[error("invalid quantity {0}: must be positive and finite")]
    InvalidQuantity(f64),

    #[error("malformed node (parent {parent:?}): {reason}")]
    MalformedNode {
        /// Item of the node whose child is malformed; `None` for the root.
        parent: Option<ItemId>,
        reason: MalformedReason,
    },

    #[error("required quantity of item {item} is not representable")]
    QuantityOverflow { item: ItemId },
}

/// Why a node could not be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("node has no item reference")]
    MissingItem,

    #[error("{components} component nodes but {ratios} component ratios")]
    RatioCountMismatch { components: usize, ratios: usize },
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// A node waiting to be visited, with the quantity of its output demanded
/// by its position in the tree.
struct Pending<'a> {
    node: &'a BlueprintNode,
    item: &'a ItemRef,
    multiplier: f64,
}

/// Compute the total quantity of every component needed to produce
/// `quantity` units of `root`'s item.
///
/// The root item itself never appears in the result. Nodes without
/// components end their branch, whether they are raw materials or were
/// truncated by the tree builder.
pub fn aggregate(root: &BlueprintNode, quantity: f64) -> Result<Materials, AggregateError> {
    run(root, quantity).inspect_err(|err| warn!("aggregation aborted: {err}"))
}

fn run(root: &BlueprintNode, quantity: f64) -> Result<Materials, AggregateError> {
    if !(quantity > 0.0 && quantity.is_finite()) {
        return Err(AggregateError::InvalidQuantity(quantity));
    }
    let root_item = root.item.as_ref().ok_or(AggregateError::MalformedNode {
        parent: None,
        reason: MalformedReason::MissingItem,
    })?;

    debug!(
        "aggregating materials for item {} ({}) x{quantity}",
        root_item.id, root_item.internal_name
    );

    let mut materials = Materials::new();
    let mut stack: Vec<Pending<'_>> = Vec::new();
    let mut visited = 1usize;

    push_components(root, root_item.id, quantity, &mut stack)?;

    while let Some(Pending {
        node,
        item,
        multiplier,
    }) = stack.pop()
    {
        visited += 1;
        trace!("visit item {} x{multiplier}", item.id);
        let total = materials.accumulate(item.id, &item.internal_name, item.item_type, multiplier);
        if !total.is_finite() {
            return Err(AggregateError::QuantityOverflow { item: item.id });
        }
        push_components(node, item.id, multiplier, &mut stack)?;
    }

    debug!(
        "aggregated {} materials from {visited} nodes for item {}",
        materials.len(),
        root_item.id
    );
    Ok(materials)
}

/// Validate `node`'s components and push them so that they pop in their
/// original order.
fn push_components<'a>(
    node: &'a BlueprintNode,
    parent: ItemId,
    multiplier: f64,
    stack: &mut Vec<Pending<'a>>,
) -> Result<(), AggregateError> {
    let components = node.component_nodes.len();
    let ratios = node.component_ratios.len();
    if components != ratios {
        return Err(AggregateError::MalformedNode {
            parent: Some(parent),
            reason: MalformedReason::RatioCountMismatch { components, ratios },
        });
    }

    let start = stack.len();
    for (index, (ratio, child)) in node.components().enumerate() {
        if !(ratio > 0.0 && ratio.is_finite()) {
            return Err(AggregateError::InvalidRatio {
                parent,
                index,
                ratio,
            });
        }
        let item = child.item.as_ref().ok_or(AggregateError::MalformedNode {
            parent: Some(parent),
            reason: MalformedReason::MissingItem,
        })?;

        let child_multiplier = multiplier * (1.0 / ratio);
        if !child_multiplier.is_finite() {
            return Err(AggregateError::QuantityOverflow { item: item.id });
        }

        stack.push(Pending {
            node: child,
            item,
            multiplier: child_multiplier,
        });
    }
    stack[start..].reverse();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
