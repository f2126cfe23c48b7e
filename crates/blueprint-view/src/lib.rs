//! Presentation of aggregated blueprint materials.
//!
//! Turns a [`blueprint_core::Materials`] result into display rows: filtered
//! by name, sorted by a chosen column, with quantities formatted for
//! reading. [`session::MaterialsSession`] ties this to a tree and keeps the
//! aggregation cached while only the view changes.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut session = MaterialsSession::new(tree);
//! session.set_quantity(3.0)?;
//! session.select_sort(SortColumn::Quantity);
//! let view = session.view()?;
//! println!("{}", view.summary());
//! ```

pub mod format;
pub mod present;
pub mod session;

pub use format::{format_integer, format_number};
pub use present::{
    MaterialRow, MaterialsQuery, MaterialsView, SortColumn, SortState, ViewStatus, present,
    present_materials,
};
pub use session::{MaterialsSession, normalize_quantity_input};
