//! Reading blueprint trees and view settings from data files.
//!
//! Provides format detection (RON/JSON/TOML) and deserialization helpers.
//! Trees are accepted either bare or wrapped the way the item service
//! returns them (`{ "tree": { ... } }`).
//!
//! The JSON and RON parsers stop at 128 levels of nesting. Every tree level
//! costs two (the node and its `component_nodes` list), so trees deeper than
//! about 60 levels fail with [`DataLoadError::Parse`]. The item service
//! builds trees 10 levels deep by default.

use blueprint_core::BlueprintNode;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The file parsed but holds values the engine cannot use.
    #[error("invalid configuration in {file}: {detail}")]
    InvalidConfig { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `origin` names the source in
/// error messages.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    origin: &Path,
) -> Result<T, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse {
        file: origin.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Trees
// ===========================================================================

/// The item service's response wrapper around a tree. `tree` is `None`
/// when the document has no top-level `tree` key, i.e. it is a bare node.
#[derive(Deserialize)]
struct TreeEnvelope {
    #[serde(default, deserialize_with = "present_tree")]
    tree: Option<BlueprintNode>,
}

// Accepts `tree: (...)` in RON as well as `"tree": {...}` in JSON.
fn present_tree<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BlueprintNode>, D::Error> {
    BlueprintNode::deserialize(deserializer).map(Some)
}

/// Parse a blueprint tree, bare or wrapped in `{ tree: ... }`.
///
/// A document with a top-level `tree` key is an envelope, and errors inside
/// it are reported as such rather than retried as a bare node.
pub fn parse_tree(content: &str, format: Format, origin: &Path) -> Result<BlueprintNode, DataLoadError> {
    match deserialize_str::<TreeEnvelope>(content, format, origin)?.tree {
        Some(tree) => Ok(tree),
        None => deserialize_str::<BlueprintNode>(content, format, origin),
    }
}

/// Load a blueprint tree from a RON, JSON or TOML file.
pub fn load_tree(path: &Path) -> Result<BlueprintNode, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let tree = parse_tree(&content, format, path)?;

    info!(
        "loaded blueprint tree for item {:?} from {} ({} nodes)",
        tree.item_id(),
        path.display(),
        tree.node_count()
    );
    Ok(tree)
}

// ===========================================================================
// Tests
// ===========================================================================
