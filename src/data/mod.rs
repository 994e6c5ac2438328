//! Dataset loading.
//!
//! - `source`: where the CSV bytes come from (remote URL or local file)
//! - `loader`: CSV parsing into the in-memory `Dataset`

pub mod loader;
pub mod source;

pub use loader::{load_dataset, parse_dataset};
pub use source::{DataSource, DatasetClient, DEFAULT_DATA_URL};
