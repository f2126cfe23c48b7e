//! Sorting and filtering of aggregated materials for display.
//!
//! The presenter is a pure function of the aggregated entries and an
//! explicit [`MaterialsQuery`]; it never recomputes quantities and never
//! fails. Unknown sort keys fall back to the default column, and an empty
//! result is reported through [`ViewStatus`] rather than as an error.

use std::cmp::Ordering;

use blueprint_core::{MaterialEntry, Materials};
use serde::{Deserialize, Serialize};

use crate::format::{format_integer, format_number};

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

/// Column of the materials table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    ItemId,
    #[default]
    InternalName,
    ItemType,
    Quantity,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::ItemId,
        SortColumn::InternalName,
        SortColumn::ItemType,
        SortColumn::Quantity,
    ];

    /// Key used by the table header and configuration files.
    pub fn key(self) -> &'static str {
        match self {
            SortColumn::ItemId => "item_id",
            SortColumn::InternalName => "internal_name",
            SortColumn::ItemType => "item_type",
            SortColumn::Quantity => "quantity",
        }
    }

    pub fn from_key(key: &str) -> Option<SortColumn> {
        SortColumn::ALL.into_iter().find(|column| column.key() == key)
    }

    /// Like [`SortColumn::from_key`], but unknown keys select the default column.
    pub fn parse_or_default(key: &str) -> SortColumn {
        SortColumn::from_key(key).unwrap_or_default()
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::default(),
            ascending: true,
        }
    }
}

impl SortState {
    /// Apply a header click: the same column flips direction, a new column
    /// starts ascending.
    pub fn select(&mut self, column: SortColumn) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column;
            self.ascending = true;
        }
    }
}

/// Everything the presenter needs besides the entries themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialsQuery {
    pub sort: SortState,
    /// Case-insensitive substring of `internal_name`; empty matches all.
    pub name_filter: String,
}

impl MaterialsQuery {
    pub fn new(column: SortColumn, ascending: bool, name_filter: impl Into<String>) -> Self {
        Self {
            sort: SortState { column, ascending },
            name_filter: name_filter.into(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.name_filter.is_empty()
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// One display-ready row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRow {
    pub entry: MaterialEntry,
    pub item_id_display: String,
    pub type_label: String,
    pub quantity_display: String,
}

impl MaterialRow {
    fn new(entry: &MaterialEntry) -> Self {
        Self {
            entry: entry.clone(),
            item_id_display: format_integer(entry.item_id.0),
            type_label: entry.item_type.label().into_owned(),
            quantity_display: format_number(entry.quantity),
        }
    }
}

/// What the materials table should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// Aggregation produced no materials at all.
    NoComponents,
    /// Materials exist but the name filter matched none of them.
    NoMatches,
    /// `n` rows are visible.
    Showing(usize),
}

/// Sorted, filtered materials plus the counts needed to describe them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialsView {
    pub rows: Vec<MaterialRow>,
    /// Number of entries before filtering.
    pub total: usize,
    pub filtered: bool,
}

impl MaterialsView {
    pub fn status(&self) -> ViewStatus {
        if self.total == 0 {
            ViewStatus::NoComponents
        } else if self.rows.is_empty() {
            ViewStatus::NoMatches
        } else {
            ViewStatus::Showing(self.rows.len())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Footer text for the table.
    pub fn summary(&self) -> String {
        if self.status() == ViewStatus::NoComponents {
            return "This item has no components.".to_string();
        }
        let n = self.rows.len();
        let plural = if n == 1 { "" } else { "s" };
        let suffix = if self.filtered { " (filtered)" } else { "" };
        format!("Showing {n} material{plural}{suffix}")
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &MaterialEntry> {
        self.rows.iter().map(|row| &row.entry)
    }
}

// ---------------------------------------------------------------------------
// Presenting
// ---------------------------------------------------------------------------

/// Filter and sort `entries` according to `query`.
///
/// Ties on the sort column are broken by item id, so the order is total and
/// a descending view is exactly the reverse of the ascending one.
pub fn present(entries: &[MaterialEntry], query: &MaterialsQuery) -> MaterialsView {
    let needle = query.name_filter.to_lowercase();
    let mut visible: Vec<&MaterialEntry> = entries
        .iter()
        .filter(|entry| needle.is_empty() || entry.internal_name.to_lowercase().contains(&needle))
        .collect();

    let column = query.sort.column;
    visible.sort_by(|a, b| compare(a, b, column).then_with(|| a.item_id.cmp(&b.item_id)));
    if !query.sort.ascending {
        visible.reverse();
    }

    MaterialsView {
        rows: visible.into_iter().map(MaterialRow::new).collect(),
        total: entries.len(),
        filtered: query.is_filtered(),
    }
}

/// [`present`] over an aggregation result.
pub fn present_materials(materials: &Materials, query: &MaterialsQuery) -> MaterialsView {
    present(&materials.to_vec(), query)
}

fn compare(a: &MaterialEntry, b: &MaterialEntry, column: SortColumn) -> Ordering {
    match column {
        SortColumn::ItemId => a.item_id.cmp(&b.item_id),
        SortColumn::InternalName => compare_text(&a.internal_name, &b.internal_name),
        SortColumn::ItemType => compare_text(&a.item_type.label(), &b.item_type.label()),
        SortColumn::Quantity => a.quantity.total_cmp(&b.quantity),
    }
}

/// Dictionary-style ordering: case-folded text first, exact text second.
fn compare_text(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::{ItemId, ItemType};

    fn entry(id: i64, name: &str, item_type: ItemType, quantity: f64) -> MaterialEntry {
        MaterialEntry {
            item_id: ItemId(id),
            internal_name: name.to_string(),
            item_type,
            quantity,
        }
    }

    fn sample() -> Vec<MaterialEntry> {
        vec![
            entry(3, "iron_ingot", ItemType::REFINED_MATERIAL, 6.0),
            entry(1, "Coal", ItemType::RAW_MATERIAL, 12.5),
            entry(7, "copper_wire", ItemType::REFINED_MATERIAL, 0.75),
            entry(2, "iron_ore", ItemType::RAW_MATERIAL, 1500.0),
        ]
    }

    fn ids(view: &MaterialsView) -> Vec<i64> {
        view.entries().map(|e| e.item_id.0).collect()
    }

    #[test]
    fn default_sorts_by_name_ascending_case_insensitive() {
        let view = present(&sample(), &MaterialsQuery::default());
        assert_eq!(ids(&view), vec![1, 7, 3, 2]);
    }

    #[test]
    fn sorts_numerically_by_id_and_quantity() {
        let by_id = present(&sample(), &MaterialsQuery::new(SortColumn::ItemId, true, ""));
        assert_eq!(ids(&by_id), vec![1, 2, 3, 7]);

        let by_qty = present(&sample(), &MaterialsQuery::new(SortColumn::Quantity, false, ""));
        assert_eq!(ids(&by_qty), vec![2, 1, 3, 7]);
    }

    #[test]
    fn item_type_sorts_by_label_with_id_tiebreak() {
        let view = present(&sample(), &MaterialsQuery::new(SortColumn::ItemType, true, ""));
        // RAWMATERIAL < REFINEDMATERIAL; ties ordered by id.
        assert_eq!(ids(&view), vec![1, 2, 3, 7]);
    }

    #[test]
    fn descending_is_exact_reverse_even_with_ties() {
        let mut entries = sample();
        entries.push(entry(9, "iron_ingot", ItemType::REFINED_MATERIAL, 6.0));

        for column in SortColumn::ALL {
            let asc = ids(&present(&entries, &MaterialsQuery::new(column, true, "")));
            let mut desc = ids(&present(&entries, &MaterialsQuery::new(column, false, "")));
            desc.reverse();
            assert_eq!(asc, desc, "column {column:?}");
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let view = present(&sample(), &MaterialsQuery::new(SortColumn::ItemId, true, "IRON"));
        assert_eq!(ids(&view), vec![2, 3]);
        assert_eq!(view.total, 4);
        assert_eq!(view.summary(), "Showing 2 materials (filtered)");
    }

    #[test]
    fn filter_matching_one_name_is_singleton() {
        let view = present(&sample(), &MaterialsQuery::new(SortColumn::Quantity, false, "wire"));
        assert_eq!(ids(&view), vec![7]);
        assert_eq!(view.status(), ViewStatus::Showing(1));
        assert_eq!(view.summary(), "Showing 1 material (filtered)");
    }

    #[test]
    fn filter_matching_nothing_is_no_matches() {
        let view = present(&sample(), &MaterialsQuery::new(SortColumn::ItemId, true, "gold"));
        assert!(view.is_empty());
        assert_eq!(view.status(), ViewStatus::NoMatches);
    }

    #[test]
    fn no_entries_is_no_components() {
        let view = present(&[], &MaterialsQuery::new(SortColumn::ItemId, true, "x"));
        assert_eq!(view.status(), ViewStatus::NoComponents);
        assert_eq!(view.summary(), "This item has no components.");
    }

    #[test]
    fn rows_carry_display_strings() {
        let view = present(&sample(), &MaterialsQuery::new(SortColumn::ItemId, true, "ore"));
        let row = &view.rows[0];
        assert_eq!(row.type_label, "RAWMATERIAL");
        assert_eq!(row.quantity_display, "1,500");
        assert_eq!(row.item_id_display, "2");
        // Raw value is untouched.
        assert_eq!(row.entry.quantity, 1500.0);
    }

    #[test]
    fn unknown_sort_key_falls_back_to_name() {
        assert_eq!(SortColumn::parse_or_default("bake_time"), SortColumn::InternalName);
        assert_eq!(SortColumn::parse_or_default("quantity"), SortColumn::Quantity);
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::from_key(column.key()), Some(column));
        }
    }

    #[test]
    fn select_toggles_same_column_and_resets_new_one() {
        let mut state = SortState::default();
        state.select(SortColumn::InternalName);
        assert_eq!(state, SortState { column: SortColumn::InternalName, ascending: false });

        state.select(SortColumn::Quantity);
        assert_eq!(state, SortState { column: SortColumn::Quantity, ascending: true });

        state.select(SortColumn::Quantity);
        assert!(!state.ascending);
    }

    #[test]
    fn input_is_not_mutated() {
        let entries = sample();
        let before = entries.clone();
        let _ = present(&entries, &MaterialsQuery::new(SortColumn::Quantity, false, "i"));
        assert_eq!(entries, before);
    }
}
