//! Blueprint Core -- material expansion for item blueprint trees.
//!
//! The item service delivers a pre-built [`tree::BlueprintNode`] for an
//! item: its components, the ratio at which each is consumed, and the
//! components' own trees, already cut off where the builder hit its depth
//! limit or found a cycle. This crate flattens such a tree into the total
//! quantity of every material needed to produce some amount of the root.
//!
//! # Example
//!
//! ```rust,ignore
//! let tree: BlueprintNode = serde_json::from_str(payload)?;
//! let materials = aggregate(&tree, 3.0)?;
//! for entry in &materials {
//!     println!("{} x{}", entry.internal_name, entry.quantity);
//! }
//! ```
//!
//! # Key Types
//!
//! - [`tree::BlueprintNode`] -- read-only annotated tree node.
//! - [`material::Materials`] -- per-item totals from one aggregation run.
//! - [`aggregate::AggregateError`] -- why a run was rejected.

pub mod aggregate;
pub mod id;
pub mod material;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{AggregateError, MalformedReason, aggregate};
pub use id::{ItemId, ItemType};
pub use material::{MaterialEntry, Materials};
pub use tree::{BlueprintInfo, BlueprintNode, ItemRef};
