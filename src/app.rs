//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the dataset (fatal on failure)
//! - hands off to the TUI, the text report, or the exporter

use clap::Parser;

use crate::cli::{Command, ExportArgs, ReportArgs, SourceArgs, TuiArgs};
use crate::error::AppError;
use crate::io::ExportMeta;
use crate::logging::LogTarget;
use crate::report::PlotOptions;

pub mod pipeline;

/// Entry point for the `autodash` binary.
pub fn run() -> Result<(), AppError> {
    // `autodash` and `autodash -f sales.csv` behave like `autodash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
        Command::Export(args) => handle_export(args),
    }
}

fn init_logging(source: &SourceArgs, interactive: bool) -> Result<(), AppError> {
    let target = match (&source.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    };
    crate::logging::init(target, source.verbose)
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    init_logging(&args.source, true)?;
    let source = crate::config::resolve_source(&args.source)?;

    // Load before touching the terminal so fetch errors print normally.
    let dataset = pipeline::load(&source)?;
    let dashboard = pipeline::Dashboard::new(dataset)?;
    crate::tui::run(dashboard)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    init_logging(&args.source, false)?;
    let source = crate::config::resolve_source(&args.source)?;
    let dataset = pipeline::load(&source)?;

    let report = args.selection.report;
    let year = args.selection.year;
    println!("{}", crate::report::format_summary(&dataset, report, year));

    match pipeline::run_selection(&dataset, report, year) {
        Some(figures) => {
            let plot = PlotOptions {
                enabled: !args.no_plot,
                width: args.width,
                height: args.height,
            };
            print!("{}", crate::report::format_figures(&figures, plot));
        }
        None => print!("{}", crate::report::format_idle()),
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    init_logging(&args.source, false)?;
    let source = crate::config::resolve_source(&args.source)?;
    let dataset = pipeline::load(&source)?;

    let report = args.selection.report;
    let year = args.selection.year;
    let figures = pipeline::run_selection(&dataset, report, year).ok_or_else(|| {
        AppError::input("Nothing to export: the yearly report needs --year.")
    })?;

    let meta = ExportMeta {
        source: dataset.source(),
        report,
        year,
    };
    crate::io::write_figures(&args.out, args.format, &figures, meta)?;
    tracing::info!(path = %args.out.display(), figures = figures.len(), "export written");
    Ok(())
}

/// Rewrite argv so `autodash` defaults to `autodash tui`.
///
/// Rules:
/// - `autodash`                          -> `autodash tui`
/// - `autodash -f sales.csv ...`         -> `autodash tui -f sales.csv ...`
/// - `autodash --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "export");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
