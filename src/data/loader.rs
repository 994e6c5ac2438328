//! CSV parsing into a `Dataset`.
//!
//! Only the six columns the dashboard aggregates over are read; any other
//! column in the file is ignored. Any malformed row aborts the load: the
//! dashboard never starts on a partial dataset.

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;

use crate::data::source::DataSource;
use crate::domain::{Dataset, SalesRecord};
use crate::error::AppError;

const COL_YEAR: &str = "year";
const COL_MONTH: &str = "month";
const COL_VEHICLE_TYPE: &str = "vehicle_type";
const COL_SALES: &str = "automobile_sales";
const COL_ADVERTISING: &str = "advertising_expenditure";
const COL_RECESSION: &str = "recession";

const REQUIRED_COLUMNS: [&str; 6] = [
    COL_YEAR,
    COL_MONTH,
    COL_VEHICLE_TYPE,
    COL_SALES,
    COL_ADVERTISING,
    COL_RECESSION,
];

/// Fetch and parse the dataset from `source`.
pub fn load_dataset(source: &DataSource) -> Result<Dataset, AppError> {
    tracing::info!(%source, "loading dataset");
    let bytes = source.read_bytes()?;
    let dataset = parse_dataset(bytes.as_slice(), source.to_string())?;
    tracing::info!(rows = dataset.len(), years = dataset.years().len(), "dataset loaded");
    Ok(dataset)
}

/// Parse CSV text from any reader.
pub fn parse_dataset<R: Read>(reader: R, source: impl Into<String>) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line, and lines are 1-based.
        let line = idx + 2;
        let record =
            result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;
        let row = parse_row(&record, &header_map)
            .map_err(|msg| AppError::input(format!("Invalid row on line {line}: {msg}")))?;
        records.push(row);
    }

    if records.is_empty() {
        return Err(AppError::input("Dataset contains no rows."));
    }

    Ok(Dataset::new(records, source))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "CSV is missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    Ok(SalesRecord {
        year: parse_year(field(record, header_map, COL_YEAR)?)?,
        month: field(record, header_map, COL_MONTH)?.to_string(),
        vehicle_type: field(record, header_map, COL_VEHICLE_TYPE)?.to_string(),
        automobile_sales: parse_number(field(record, header_map, COL_SALES)?, "Automobile_Sales")?,
        advertising_expenditure: parse_number(
            field(record, header_map, COL_ADVERTISING)?,
            "Advertising_Expenditure",
        )?,
        recession: parse_flag(field(record, header_map, COL_RECESSION)?)?,
    })
}

fn field<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .copied()
        .ok_or_else(|| format!("missing column {name}"))?;
    record
        .get(idx)
        .ok_or_else(|| format!("row has no value for {name}"))
}

fn parse_year(raw: &str) -> Result<i32, String> {
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    // Some exports write integer columns as floats ("2000.0").
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i32),
        _ => Err(format!("invalid Year '{raw}'")),
    }
}

fn parse_number(raw: &str, column: &str) -> Result<f64, String> {
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("invalid {column} '{raw}'"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite {column} '{raw}'"))
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "1.0" => Ok(true),
        "0" | "0.0" => Ok(false),
        _ => Err(format!("invalid Recession flag '{raw}' (expected 0 or 1)")),
    }
}
