//! Interactive materials table state.
//!
//! A [`MaterialsSession`] owns the tree being inspected, the requested
//! quantity and the current [`MaterialsQuery`]. Sort and filter changes
//! only re-present the cached aggregation; the tree is walked again only
//! after the tree or the quantity actually changed.

use blueprint_core::{AggregateError, BlueprintNode, Materials, aggregate};
use log::debug;

use crate::present::{MaterialsQuery, MaterialsView, SortColumn, present_materials};

/// Quantity used when the input box is empty or unusable.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Interpret the quantity input box the way the console does: anything
/// that is not a number of at least 1 becomes 1.
pub fn normalize_quantity_input(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= DEFAULT_QUANTITY => value,
        _ => DEFAULT_QUANTITY,
    }
}

/// Tree, quantity and view state for one materials table.
#[derive(Debug, Clone)]
pub struct MaterialsSession {
    tree: BlueprintNode,
    quantity: f64,
    query: MaterialsQuery,
    /// Aggregation for the current tree and quantity, if still valid.
    cached: Option<Materials>,
    aggregation_runs: u64,
}

impl MaterialsSession {
    /// Start a session at the default quantity with the default query.
    pub fn new(tree: BlueprintNode) -> Self {
        Self {
            tree,
            quantity: DEFAULT_QUANTITY,
            query: MaterialsQuery::default(),
            cached: None,
            aggregation_runs: 0,
        }
    }

    /// Start a session with an explicit quantity and query.
    pub fn with_query(
        tree: BlueprintNode,
        quantity: f64,
        query: MaterialsQuery,
    ) -> Result<Self, AggregateError> {
        let mut session = Self::new(tree);
        session.set_quantity(quantity)?;
        session.query = query;
        Ok(session)
    }

    pub fn tree(&self) -> &BlueprintNode {
        &self.tree
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn query(&self) -> &MaterialsQuery {
        &self.query
    }

    /// Number of times the tree has been aggregated.
    pub fn aggregation_runs(&self) -> u64 {
        self.aggregation_runs
    }

    /// Replace the tree; the next view re-aggregates.
    pub fn set_tree(&mut self, tree: BlueprintNode) {
        self.tree = tree;
        self.cached = None;
    }

    /// Change the requested quantity. Invalid quantities are rejected and
    /// leave the session unchanged.
    pub fn set_quantity(&mut self, quantity: f64) -> Result<(), AggregateError> {
        if !(quantity > 0.0 && quantity.is_finite()) {
            return Err(AggregateError::InvalidQuantity(quantity));
        }
        if quantity != self.quantity {
            self.quantity = quantity;
            self.cached = None;
        }
        Ok(())
    }

    /// Header click on `column`.
    pub fn select_sort(&mut self, column: SortColumn) {
        self.query.sort.select(column);
    }

    pub fn set_filter(&mut self, name_filter: impl Into<String>) {
        self.query.name_filter = name_filter.into();
    }

    /// Aggregated materials for the current tree and quantity.
    pub fn materials(&mut self) -> Result<&Materials, AggregateError> {
        let materials = match self.cached.take() {
            Some(materials) => {
                debug!("reusing aggregation at quantity {}", self.quantity);
                materials
            }
            None => {
                self.aggregation_runs += 1;
                aggregate(&self.tree, self.quantity)?
            }
        };
        Ok(self.cached.insert(materials))
    }

    /// The table as it should currently be displayed.
    pub fn view(&mut self) -> Result<MaterialsView, AggregateError> {
        let query = self.query.clone();
        let materials = self.materials()?;
        Ok(present_materials(materials, &query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::ViewStatus;
    use blueprint_core::test_utils::*;
    use blueprint_core::{ItemId, ItemType};

    fn workshop_tree() -> BlueprintNode {
        producible(
            item(1, "Sword", ItemType::WEAPON),
            vec![
                (0.5, producible(item(2, "Iron Ingot", ItemType::REFINED_MATERIAL), vec![(1.0, raw(3, "Iron Ore"))])),
                (1.0, raw(4, "Leather Strip")),
            ],
        )
    }

    #[test]
    fn view_aggregates_once_for_many_view_changes() {
        let mut session = MaterialsSession::new(workshop_tree());
        session.view().unwrap();
        session.select_sort(SortColumn::Quantity);
        session.set_filter("iron");
        let view = session.view().unwrap();

        assert_eq!(session.aggregation_runs(), 1);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn quantity_change_reaggregates() {
        let mut session = MaterialsSession::new(workshop_tree());
        session.view().unwrap();

        session.set_quantity(1.0).unwrap();
        session.view().unwrap();
        assert_eq!(session.aggregation_runs(), 1);

        session.set_quantity(5.0).unwrap();
        let materials = session.materials().unwrap();
        assert_eq!(materials.quantity_of(ItemId(3)), 10.0);
        assert_eq!(session.aggregation_runs(), 2);
    }

    #[test]
    fn invalid_quantity_keeps_previous_state() {
        let mut session = MaterialsSession::new(workshop_tree());
        session.set_quantity(2.0).unwrap();
        assert!(matches!(
            session.set_quantity(-3.0),
            Err(AggregateError::InvalidQuantity(_))
        ));
        assert_eq!(session.quantity(), 2.0);
    }

    #[test]
    fn set_tree_reaggregates() {
        let mut session = MaterialsSession::new(workshop_tree());
        session.view().unwrap();
        session.set_tree(raw(9, "Stone"));
        let view = session.view().unwrap();

        assert_eq!(session.aggregation_runs(), 2);
        assert_eq!(view.status(), ViewStatus::NoComponents);
    }

    #[test]
    fn failed_aggregation_is_not_cached() {
        let mut bad = workshop_tree();
        bad.component_ratios[1] = 0.0;
        let mut session = MaterialsSession::new(bad);

        assert!(session.view().is_err());
        assert!(session.view().is_err());
        assert_eq!(session.aggregation_runs(), 2);
    }

    #[test]
    fn with_query_applies_everything() {
        let session = MaterialsSession::with_query(
            workshop_tree(),
            3.0,
            MaterialsQuery::new(SortColumn::ItemId, false, "ore"),
        );
        let mut session = session.unwrap();
        let view = session.view().unwrap();
        assert_eq!(session.quantity(), 3.0);
        assert_eq!(view.entries().map(|e| e.item_id.0).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn cloning_a_session_over_a_deep_chain() {
        let mut session = MaterialsSession::new(chain(100_000, 1.0));
        assert_eq!(session.materials().unwrap().len(), 100_000);

        let mut copy = session.clone();
        assert_eq!(copy.tree().depth(), 100_000);
        assert!(copy.tree() == session.tree());
        assert_eq!(copy.materials().unwrap().len(), 100_000);
        assert_eq!(copy.aggregation_runs(), 1);
    }

    #[test]
    fn quantity_input_normalization() {
        assert_eq!(normalize_quantity_input("25"), 25.0);
        assert_eq!(normalize_quantity_input(" 2.5 "), 2.5);
        assert_eq!(normalize_quantity_input("0.5"), 1.0);
        assert_eq!(normalize_quantity_input("-4"), 1.0);
        assert_eq!(normalize_quantity_input(""), 1.0);
        assert_eq!(normalize_quantity_input("lots"), 1.0);
        assert_eq!(normalize_quantity_input("inf"), 1.0);
    }
}
