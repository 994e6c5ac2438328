//! Command-line parsing for the automobile sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading, aggregation and rendering.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ReportType;
use crate::io::ExportFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autodash", version, about = "Automobile Sales Statistics Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(TuiArgs),
    /// Print the charts of one selection as tables and text plots.
    Report(ReportArgs),
    /// Write the charts of one selection to CSV or JSON.
    Export(ExportArgs),
}

/// Where to load the dataset from, plus logging. Shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// Dataset URL (defaults to the public historical automobile sales CSV).
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    pub url: Option<String>,

    /// Local dataset CSV instead of downloading.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Append logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Which selection to compute.
#[derive(Debug, Args, Clone)]
pub struct SelectionArgs {
    /// Report type.
    #[arg(short = 'r', long, value_enum)]
    pub report: ReportType,

    /// Year for the yearly report (ignored for recession).
    #[arg(short = 'y', long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Skip the text plots; print tables only.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output path.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_selection() {
        let cli = Cli::parse_from(["autodash", "report", "-r", "yearly", "-y", "1990", "--no-plot"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.selection.report, ReportType::Yearly);
        assert_eq!(args.selection.year, Some(1990));
        assert!(args.no_plot);
        assert_eq!(args.width, 72);
    }

    #[test]
    fn parses_export_with_file_source() {
        let cli = Cli::parse_from([
            "autodash", "export", "-r", "recession", "-o", "out.json", "--format", "json", "-f",
            "sales.csv",
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.selection.report, ReportType::Recession);
        assert_eq!(args.format, ExportFormat::Json);
        assert_eq!(args.source.file, Some(PathBuf::from("sales.csv")));
    }

    #[test]
    fn url_and_file_conflict() {
        let res = Cli::try_parse_from(["autodash", "tui", "--url", "http://x", "--file", "a.csv"]);
        assert!(res.is_err());
    }
}
