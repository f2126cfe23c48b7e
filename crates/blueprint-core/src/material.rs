use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::id::{ItemId, ItemType};

/// Accumulated requirement for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub item_id: ItemId,
    pub internal_name: String,
    pub item_type: ItemType,
    /// Unrounded total across every contributing path.
    pub quantity: f64,
}

/// Flattened material requirements produced by one aggregation run,
/// keyed by item id.
///
/// Only the aggregator builds one; callers get a read-only value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materials {
    entries: BTreeMap<ItemId, MaterialEntry>,
}

impl Materials {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to the entry for `item_id`, creating it with the given
    /// metadata on first sight. Later metadata for the same id is ignored.
    /// Returns the new total for the item.
    pub(crate) fn accumulate(
        &mut self,
        item_id: ItemId,
        internal_name: &str,
        item_type: ItemType,
        quantity: f64,
    ) -> f64 {
        let entry = self
            .entries
            .entry(item_id)
            .or_insert_with(|| MaterialEntry {
                item_id,
                internal_name: internal_name.to_string(),
                item_type,
                quantity: 0.0,
            });
        entry.quantity += quantity;
        entry.quantity
    }

    pub fn get(&self, item_id: ItemId) -> Option<&MaterialEntry> {
        self.entries.get(&item_id)
    }

    /// Accumulated quantity for `item_id`, or 0 when it is not required.
    pub fn quantity_of(&self, item_id: ItemId) -> f64 {
        self.get(item_id).map_or(0.0, |entry| entry.quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending item id order.
    pub fn iter(&self) -> btree_map::Values<'_, ItemId, MaterialEntry> {
        self.entries.values()
    }

    /// Snapshot of the entries for presentation, in item id order.
    pub fn to_vec(&self) -> Vec<MaterialEntry> {
        self.entries.values().cloned().collect()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> f64 {
        self.entries.values().map(|entry| entry.quantity).sum()
    }
}

impl<'a> IntoIterator for &'a Materials {
    type Item = &'a MaterialEntry;
    type IntoIter = btree_map::Values<'a, ItemId, MaterialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Materials {
    type Item = MaterialEntry;
    type IntoIter = btree_map::IntoValues<ItemId, MaterialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
