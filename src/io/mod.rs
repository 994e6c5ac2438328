//! Output helpers.
//!
//! - figure exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;
