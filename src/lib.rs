//! `autosales-dash` library crate.
//!
//! The binary (`autodash`) is a thin wrapper around this library so that:
//!
//! - aggregation and handler logic is testable without a terminal
//! - the TUI and the one-shot commands share one pipeline

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod controller;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
pub mod ui;
