//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - shared read-only across every handler invocation
//! - exported to JSON/CSV
//! - compared in tests without any rendering involved

use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One row of the historical automobile sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,
    pub month: String,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub recession: bool,
}

/// The loaded dataset.
///
/// Constructed once at startup and then only ever borrowed immutably.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    source: String,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>, source: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Human-readable description of where the rows came from (URL or path).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct years present in the dataset, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn min_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }
}

/// Top-level dashboard mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Charts scoped to a single selected year.
    Yearly,
    /// Charts over every row flagged as a recession period.
    Recession,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Yearly, ReportType::Recession];

    /// The exact value carried by the report-type selector.
    pub fn label(self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly Statistics",
            ReportType::Recession => "Recession Period Statistics",
        }
    }

    /// Exact (case-sensitive) match against the selector values.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// Column used to partition rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyColumn {
    Year,
    Month,
    VehicleType,
}

impl KeyColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            KeyColumn::Year => "Year",
            KeyColumn::Month => "Month",
            KeyColumn::VehicleType => "Vehicle_Type",
        }
    }

    pub fn key_of(self, record: &SalesRecord) -> GroupKey {
        match self {
            KeyColumn::Year => GroupKey::Year(record.year),
            KeyColumn::Month => GroupKey::Label(record.month.clone()),
            KeyColumn::VehicleType => GroupKey::Label(record.vehicle_type.clone()),
        }
    }
}

/// Numeric column reduced within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueColumn {
    AutomobileSales,
    AdvertisingExpenditure,
}

impl ValueColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            ValueColumn::AutomobileSales => "Automobile_Sales",
            ValueColumn::AdvertisingExpenditure => "Advertising_Expenditure",
        }
    }

    pub fn value_of(self, record: &SalesRecord) -> f64 {
        match self {
            ValueColumn::AutomobileSales => record.automobile_sales,
            ValueColumn::AdvertisingExpenditure => record.advertising_expenditure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggOp {
    Mean,
    Sum,
}

/// Value of the group column for one partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Year(i32),
    Label(String),
}

impl From<i32> for GroupKey {
    fn from(value: i32) -> Self {
        GroupKey::Year(value)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Label(value.to_string())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(y) => write!(f, "{y}"),
            GroupKey::Label(s) => f.write_str(s),
        }
    }
}

/// Output of a single group-by: `(key, reduced value)` pairs in
/// first-encountered key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub key: KeyColumn,
    pub value: ValueColumn,
    pub op: AggOp,
    pub points: Vec<(GroupKey, f64)>,
}

impl AggregatedSeries {
    pub fn empty(key: KeyColumn, value: ValueColumn, op: AggOp) -> Self {
        Self {
            key,
            value,
            op,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.points.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.points.iter().map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: &str) -> SalesRecord {
        SalesRecord {
            year,
            month: month.to_string(),
            vehicle_type: "Car".to_string(),
            automobile_sales: 1.0,
            advertising_expenditure: 1.0,
            recession: false,
        }
    }

    #[test]
    fn years_are_distinct_and_sorted() {
        let ds = Dataset::new(
            vec![record(2001, "Jan"), record(1999, "Feb"), record(2001, "Mar")],
            "test",
        );
        assert_eq!(ds.years(), vec![1999, 2001]);
        assert_eq!(ds.min_year(), Some(1999));
    }

    #[test]
    fn empty_dataset_has_no_min_year() {
        let ds = Dataset::new(Vec::new(), "test");
        assert!(ds.years().is_empty());
        assert_eq!(ds.min_year(), None);
    }

    #[test]
    fn report_type_labels_match_exactly() {
        assert_eq!(ReportType::from_label("Yearly Statistics"), Some(ReportType::Yearly));
        assert_eq!(
            ReportType::from_label("Recession Period Statistics"),
            Some(ReportType::Recession)
        );
        assert_eq!(ReportType::from_label("yearly statistics"), None);
        assert_eq!(ReportType::from_label("Select Statistics"), None);
        assert_eq!(ReportType::from_label(""), None);
    }

    #[test]
    fn group_key_display() {
        assert_eq!(GroupKey::Year(1987).to_string(), "1987");
        assert_eq!(GroupKey::from("Supperminicar").to_string(), "Supperminicar");
    }
}
