pub mod config;
pub mod loader;

pub use config::{ViewConfig, load_view_config};
pub use loader::{DataLoadError, Format, deserialize_file, detect_format, load_tree, parse_tree};
