use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifies an item in the content database. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item classification code as sent by the item service.
///
/// The code is kept as-is so that values added on the backend still
/// round-trip; only the display label depends on the known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemType(pub i32);

impl ItemType {
    pub const VIRTUAL: ItemType = ItemType(1);
    pub const CONTAINER: ItemType = ItemType(2);
    pub const WEAPON: ItemType = ItemType(3);
    pub const RAW_MATERIAL: ItemType = ItemType(4);
    pub const REFINED_MATERIAL: ItemType = ItemType(5);

    /// Enum name for a known code, `None` otherwise.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("VIRTUAL"),
            2 => Some("CONTAINER"),
            3 => Some("WEAPON"),
            4 => Some("RAWMATERIAL"),
            5 => Some("REFINEDMATERIAL"),
            _ => None,
        }
    }

    /// Display label: the enum name, or the raw code for unknown values.
    pub fn label(self) -> Cow<'static, str> {
        match self.name() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.0.to_string()),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
