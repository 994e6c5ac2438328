//! Text reports for the non-interactive `report` command.

pub mod format;

pub use format::*;
