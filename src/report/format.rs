//! Formatted terminal output for a dashboard selection.
//!
//! We keep formatting code in one place so output changes are localized
//! (and easy to pin down with snapshot-style tests).

use crate::chart::ascii::truncate;
use crate::chart::{render_ascii, Figure};
use crate::domain::{Dataset, ReportType};

/// How figures are printed after their tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub enabled: bool,
    pub width: usize,
    pub height: usize,
}

/// Header describing the dataset and the selection.
pub fn format_summary(dataset: &Dataset, report: ReportType, year: Option<i32>) -> String {
    let mut out = String::new();
    out.push_str("=== autodash - Automobile Sales Statistics ===\n");
    out.push_str(&format!("Source: {}\n", dataset.source()));

    let years = dataset.years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Rows: {} | years: {first}..{last} ({} distinct)\n",
            dataset.len(),
            years.len()
        )),
        _ => out.push_str(&format!("Rows: {}\n", dataset.len())),
    }

    match (report, year) {
        (ReportType::Yearly, Some(y)) => out.push_str(&format!("Report: {} ({y})\n", report.label())),
        _ => out.push_str(&format!("Report: {}\n", report.label())),
    }
    out
}

/// One table per figure, optionally followed by its text chart.
pub fn format_figures(figures: &[Figure], plot: PlotOptions) -> String {
    let mut out = String::new();
    for fig in figures {
        out.push('\n');
        out.push_str(&format_table(fig));
        if plot.enabled {
            out.push('\n');
            out.push_str(&render_ascii(fig, plot.width, plot.height));
        }
    }
    out
}

/// Printed instead of figures when the selection is incomplete.
pub fn format_idle() -> String {
    "No output: select \"Recession Period Statistics\", or \"Yearly Statistics\" with a year.\n"
        .to_string()
}

fn format_table(fig: &Figure) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", fig.title(), fig.kind().display_name()));

    if fig.is_empty() {
        out.push_str("  (no rows)\n");
        return out;
    }

    let key_header = fig.spec.x.column_name();
    let value_header = fig.spec.y.column_name();
    out.push_str(&format!("{key_header:<24} {value_header:>24}\n"));
    out.push_str(&format!("{:-<24} {:->24}\n", "", ""));
    for p in &fig.points {
        out.push_str(&format!("{:<24} {:>24.2}\n", truncate(&p.label, 24), p.value));
    }
    out
}
