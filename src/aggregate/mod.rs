//! Group-by aggregation over the sales dataset.
//!
//! Every function here is pure: the dataset is only borrowed, and results are
//! recomputed on each call. Groups are emitted in the order their key is
//! first encountered, and only observed keys ever appear.

use std::collections::HashMap;

use crate::domain::{AggOp, AggregatedSeries, Dataset, GroupKey, KeyColumn, SalesRecord, ValueColumn};

/// Recession-scoped aggregates (rows with `Recession == 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct RecessionAggregates {
    /// Mean `Automobile_Sales` by `Year`.
    pub by_year_mean: AggregatedSeries,
    /// Mean `Automobile_Sales` by `Vehicle_Type`.
    pub by_vehicle_mean_sales: AggregatedSeries,
    /// Mean `Advertising_Expenditure` by `Vehicle_Type`.
    pub by_vehicle_mean_expenditure: AggregatedSeries,
}

/// Aggregates for a single selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAggregates {
    /// Mean `Automobile_Sales` for the year (one point, or none).
    pub yearly_mean: AggregatedSeries,
    /// Total `Automobile_Sales` by `Month`.
    pub monthly_sum: AggregatedSeries,
    /// Mean `Automobile_Sales` by `Vehicle_Type`.
    pub by_vehicle_mean: AggregatedSeries,
    /// Total `Advertising_Expenditure` by `Vehicle_Type`.
    pub by_vehicle_expenditure_sum: AggregatedSeries,
}

/// Partition `rows` by `key` and reduce `value` within each partition.
pub fn group_by<'a, I>(rows: I, key: KeyColumn, value: ValueColumn, op: AggOp) -> AggregatedSeries
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    // (key, sum, count) in first-seen order.
    let mut groups: Vec<(GroupKey, f64, usize)> = Vec::new();

    for row in rows {
        let k = key.key_of(row);
        let v = value.value_of(row);
        match index.get(&k) {
            Some(&i) => {
                groups[i].1 += v;
                groups[i].2 += 1;
            }
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, v, 1));
            }
        }
    }

    let points = groups
        .into_iter()
        .map(|(k, sum, count)| {
            let reduced = match op {
                AggOp::Sum => sum,
                // count >= 1 for every emitted group
                AggOp::Mean => sum / count as f64,
            };
            (k, reduced)
        })
        .collect();

    AggregatedSeries {
        key,
        value,
        op,
        points,
    }
}

pub fn aggregate_recession(dataset: &Dataset) -> RecessionAggregates {
    let rows: Vec<&SalesRecord> = dataset.records().iter().filter(|r| r.recession).collect();

    RecessionAggregates {
        by_year_mean: group_by(
            rows.iter().copied(),
            KeyColumn::Year,
            ValueColumn::AutomobileSales,
            AggOp::Mean,
        ),
        by_vehicle_mean_sales: group_by(
            rows.iter().copied(),
            KeyColumn::VehicleType,
            ValueColumn::AutomobileSales,
            AggOp::Mean,
        ),
        by_vehicle_mean_expenditure: group_by(
            rows.iter().copied(),
            KeyColumn::VehicleType,
            ValueColumn::AdvertisingExpenditure,
            AggOp::Mean,
        ),
    }
}

pub fn aggregate_yearly(dataset: &Dataset, year: i32) -> YearlyAggregates {
    let rows: Vec<&SalesRecord> = dataset.records().iter().filter(|r| r.year == year).collect();

    YearlyAggregates {
        yearly_mean: group_by(
            rows.iter().copied(),
            KeyColumn::Year,
            ValueColumn::AutomobileSales,
            AggOp::Mean,
        ),
        monthly_sum: group_by(
            rows.iter().copied(),
            KeyColumn::Month,
            ValueColumn::AutomobileSales,
            AggOp::Sum,
        ),
        by_vehicle_mean: group_by(
            rows.iter().copied(),
            KeyColumn::VehicleType,
            ValueColumn::AutomobileSales,
            AggOp::Mean,
        ),
        by_vehicle_expenditure_sum: group_by(
            rows.iter().copied(),
            KeyColumn::VehicleType,
            ValueColumn::AdvertisingExpenditure,
            AggOp::Sum,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, month: &str, vehicle: &str, sales: f64, adv: f64, recession: bool) -> SalesRecord {
        SalesRecord {
            year,
            month: month.to_string(),
            vehicle_type: vehicle.to_string(),
            automobile_sales: sales,
            advertising_expenditure: adv,
            recession,
        }
    }

    fn mixed_dataset() -> Dataset {
        Dataset::new(
            vec![
                rec(1980, "Jan", "Car", 100.0, 10.0, true),
                rec(1980, "Feb", "Truck", 300.0, 30.0, true),
                rec(1980, "Jan", "Car", 50.0, 5.0, true),
                rec(1981, "Jan", "Car", 400.0, 40.0, false),
                rec(1981, "Mar", "Van", 80.0, 8.0, false),
                rec(1982, "Apr", "Car", 200.0, 20.0, true),
            ],
            "mixed",
        )
    }

    #[test]
    fn two_row_scenario() {
        let ds = Dataset::new(
            vec![
                rec(2000, "Jan", "Car", 100.0, 10.0, false),
                rec(2000, "Feb", "Car", 200.0, 20.0, false),
            ],
            "scenario",
        );
        let agg = aggregate_yearly(&ds, 2000);
        assert_eq!(
            agg.monthly_sum.points,
            vec![(GroupKey::from("Jan"), 100.0), (GroupKey::from("Feb"), 200.0)]
        );
        assert_eq!(agg.yearly_mean.points, vec![(GroupKey::Year(2000), 150.0)]);
    }

    #[test]
    fn monthly_sum_matches_rows_of_year() {
        let ds = mixed_dataset();
        for year in ds.years() {
            let agg = aggregate_yearly(&ds, year);
            let rows: Vec<&SalesRecord> = ds.records().iter().filter(|r| r.year == year).collect();
            for (key, total) in &agg.monthly_sum.points {
                let GroupKey::Label(month) = key else {
                    panic!("month keys are labels");
                };
                assert!(rows.iter().any(|r| &r.month == month));
                let expected: f64 = rows
                    .iter()
                    .filter(|r| &r.month == month)
                    .map(|r| r.automobile_sales)
                    .sum();
                assert!((total - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn recession_mean_by_vehicle_type() {
        let ds = mixed_dataset();
        let agg = aggregate_recession(&ds);

        // Car recession rows: 100, 50, 200.
        let car = agg.by_vehicle_mean_sales.get(&GroupKey::from("Car")).unwrap();
        assert!((car - 350.0 / 3.0).abs() < 1e-9);
        assert_eq!(agg.by_vehicle_mean_sales.get(&GroupKey::from("Truck")), Some(300.0));
        // Van only appears outside recessions.
        assert_eq!(agg.by_vehicle_mean_sales.get(&GroupKey::from("Van")), None);

        assert_eq!(
            agg.by_year_mean.keys().cloned().collect::<Vec<_>>(),
            vec![GroupKey::Year(1980), GroupKey::Year(1982)]
        );
        assert_eq!(agg.by_year_mean.get(&GroupKey::Year(1980)), Some(150.0));

        let car_adv = agg
            .by_vehicle_mean_expenditure
            .get(&GroupKey::from("Car"))
            .unwrap();
        assert!((car_adv - 35.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn yearly_expenditure_is_summed() {
        let ds = mixed_dataset();
        let agg = aggregate_yearly(&ds, 1980);
        assert_eq!(agg.by_vehicle_expenditure_sum.get(&GroupKey::from("Car")), Some(15.0));
        assert_eq!(agg.by_vehicle_mean.get(&GroupKey::from("Car")), Some(75.0));
        assert_eq!(agg.monthly_sum.get(&GroupKey::from("Jan")), Some(150.0));
    }

    #[test]
    fn absent_year_yields_empty_series() {
        let agg = aggregate_yearly(&mixed_dataset(), 1999);
        assert!(agg.yearly_mean.is_empty());
        assert!(agg.monthly_sum.is_empty());
        assert!(agg.by_vehicle_mean.is_empty());
        assert!(agg.by_vehicle_expenditure_sum.is_empty());
    }

    #[test]
    fn no_recession_rows_yields_empty_series() {
        let ds = Dataset::new(vec![rec(2000, "Jan", "Car", 1.0, 1.0, false)], "calm");
        let agg = aggregate_recession(&ds);
        assert!(agg.by_year_mean.is_empty());
        assert!(agg.by_vehicle_mean_sales.is_empty());
        assert!(agg.by_vehicle_mean_expenditure.is_empty());
    }

    #[test]
    fn group_by_keeps_first_seen_order() {
        let ds = mixed_dataset();
        let s = group_by(
            ds.records(),
            KeyColumn::VehicleType,
            ValueColumn::AutomobileSales,
            AggOp::Sum,
        );
        let keys: Vec<String> = s.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Car", "Truck", "Van"]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let ds = mixed_dataset();
        assert_eq!(aggregate_recession(&ds), aggregate_recession(&ds));
        assert_eq!(aggregate_yearly(&ds, 1981), aggregate_yearly(&ds, 1981));
    }
}
