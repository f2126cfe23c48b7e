//! Materials table settings loaded from a data file.
//!
//! Every field is optional. Unknown sort columns select the default column
//! rather than failing, matching the presenter; a quantity that is not a
//! positive number is rejected.

use blueprint_view::{MaterialsQuery, SortColumn, SortState};
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::loader::{DataLoadError, deserialize_file};

/// Initial state of a materials table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Units of the root item to produce.
    pub quantity: f64,
    #[serde(deserialize_with = "lenient_sort_column")]
    pub sort_column: SortColumn,
    pub ascending: bool,
    pub name_filter: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            quantity: 1.0,
            sort_column: SortColumn::default(),
            ascending: true,
            name_filter: String::new(),
        }
    }
}

impl ViewConfig {
    /// The presenter query described by this configuration.
    pub fn query(&self) -> MaterialsQuery {
        MaterialsQuery {
            sort: SortState {
                column: self.sort_column,
                ascending: self.ascending,
            },
            name_filter: self.name_filter.clone(),
        }
    }

    /// Check values the engine would reject later.
    pub fn validate(&self, origin: &Path) -> Result<(), DataLoadError> {
        if !(self.quantity > 0.0 && self.quantity.is_finite()) {
            return Err(DataLoadError::InvalidConfig {
                file: origin.to_path_buf(),
                detail: format!("quantity must be a positive number, got {}", self.quantity),
            });
        }
        Ok(())
    }
}

fn lenient_sort_column<'de, D>(deserializer: D) -> Result<SortColumn, D::Error>
where
    D: Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    Ok(SortColumn::parse_or_default(&key))
}

/// Load and validate a [`ViewConfig`] from a RON, JSON or TOML file.
pub fn load_view_config(path: &Path) -> Result<ViewConfig, DataLoadError> {
    let config: ViewConfig = deserialize_file(path)?;
    config.validate(path)?;
    info!(
        "loaded view config from {}: quantity {}, sort {} {}",
        path.display(),
        config.quantity,
        config.sort_column.key(),
        if config.ascending { "asc" } else { "desc" }
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Format, deserialize_str};

    fn parse(content: &str, format: Format) -> ViewConfig {
        deserialize_str(content, format, Path::new("inline")).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse("{}", Format::Json), ViewConfig::default());
        assert_eq!(parse("", Format::Toml), ViewConfig::default());
    }

    #[test]
    fn reads_all_fields() {
        let config = parse(
            r#"
            quantity = 25.0
            sort_column = "quantity"
            ascending = false
            name_filter = "iron"
            "#,
            Format::Toml,
        );
        assert_eq!(config.quantity, 25.0);
        assert_eq!(
            config.query(),
            MaterialsQuery::new(SortColumn::Quantity, false, "iron")
        );
    }

    #[test]
    fn unknown_sort_column_falls_back() {
        let config = parse(r#"{"sort_column": "bake_time"}"#, Format::Json);
        assert_eq!(config.sort_column, SortColumn::InternalName);

        let config = parse(r#"(sort_column: "item_type")"#, Format::Ron);
        assert_eq!(config.sort_column, SortColumn::ItemType);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let config = parse(r#"{"quantity": 0}"#, Format::Json);
        assert!(matches!(
            config.validate(Path::new("view.json")),
            Err(DataLoadError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn serializes_sort_column_as_key() {
        let json = serde_json::to_value(ViewConfig::default()).unwrap();
        assert_eq!(json["sort_column"], "internal_name");
    }
}
