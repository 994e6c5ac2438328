//! Export the figures of one selection to CSV or JSON.
//!
//! CSV is one row per plotted point (`chart,kind,label,value`) for
//! spreadsheets; JSON keeps the full figure specs plus run metadata.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::chart::Figure;
use crate::domain::ReportType;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// JSON export document.
#[derive(Debug, Serialize)]
pub struct ExportFile<'a> {
    pub tool: &'static str,
    pub generated: String,
    pub source: &'a str,
    pub report: ReportType,
    pub year: Option<i32>,
    pub figures: &'a [Figure],
}

pub fn write_figures(
    path: &Path,
    format: ExportFormat,
    figures: &[Figure],
    meta: ExportMeta<'_>,
) -> Result<(), AppError> {
    match format {
        ExportFormat::Csv => write_figures_csv(path, figures),
        ExportFormat::Json => write_figures_json(path, figures, meta),
    }
}

/// Run metadata recorded in JSON exports.
#[derive(Debug, Clone, Copy)]
pub struct ExportMeta<'a> {
    pub source: &'a str,
    pub report: ReportType,
    pub year: Option<i32>,
}

pub fn write_figures_csv(path: &Path, figures: &[Figure]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::input(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writer
        .write_record(["chart", "kind", "label", "value"])
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for fig in figures {
        for p in &fig.points {
            let value = format!("{:.4}", p.value);
            writer
                .write_record([fig.title(), fig.kind().display_name(), p.label.as_str(), value.as_str()])
                .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

pub fn write_figures_json(path: &Path, figures: &[Figure], meta: ExportMeta<'_>) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    let doc = ExportFile {
        tool: "autodash",
        generated: chrono::Local::now().to_rfc3339(),
        source: meta.source,
        report: meta.report,
        year: meta.year,
        figures,
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;
    Ok(())
}
