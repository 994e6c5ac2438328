//! The two dashboard handlers.
//!
//! Both are pure functions of the dataset and the current selector values;
//! nothing is remembered between calls.

use crate::aggregate::{aggregate_recession, aggregate_yearly};
use crate::chart::{build_figure, ChartSpec, Figure};
use crate::domain::{Dataset, KeyColumn, ReportType, ValueColumn};
use crate::ui::{
    Container, Direction, Dispatcher, Output, UiNode, CLASS_CHART_ITEM, OUTPUT_CONTAINER,
    REPORT_SELECTOR, YEAR_SELECTOR,
};

/// Year selector is enabled only for exactly "Yearly Statistics".
pub fn year_selector_disabled(report: Option<&str>) -> bool {
    report != Some(ReportType::Yearly.label())
}

/// Figures for a complete selection, or `None` while the selection is incomplete.
pub fn selection_figures(dataset: &Dataset, report: Option<&str>, year: Option<i32>) -> Option<Vec<Figure>> {
    match (report.and_then(ReportType::from_label), year) {
        (Some(ReportType::Recession), _) => Some(recession_figures(dataset)),
        (Some(ReportType::Yearly), Some(year)) => Some(yearly_figures(dataset, year)),
        _ => None,
    }
}

/// Render dispatch: the children of the output region, or `None` (idle).
pub fn render_output(dataset: &Dataset, report: Option<&str>, year: Option<i32>) -> Option<Vec<UiNode>> {
    let figures = selection_figures(dataset, report, year)?;
    // Recession: [line, bar] | [pie]. Yearly: [line, line] | [bar, pie].
    let mut figures = figures.into_iter();
    let first: Vec<Figure> = figures.by_ref().take(2).collect();
    let second: Vec<Figure> = figures.collect();
    Some(vec![chart_group(first), chart_group(second)])
}

pub fn recession_figures(dataset: &Dataset) -> Vec<Figure> {
    let agg = aggregate_recession(dataset);
    vec![
        build_figure(
            ChartSpec::line(
                KeyColumn::Year,
                ValueColumn::AutomobileSales,
                "Average Automobile Sales fluctuation over Recession Period",
            ),
            &agg.by_year_mean,
        ),
        build_figure(
            ChartSpec::bar(
                KeyColumn::VehicleType,
                ValueColumn::AutomobileSales,
                "Average Automobile Sales by Vehicle Type during Recession Period",
            ),
            &agg.by_vehicle_mean_sales,
        ),
        build_figure(
            ChartSpec::pie(
                KeyColumn::VehicleType,
                ValueColumn::AdvertisingExpenditure,
                "Total Expenditure Share by Vehicle Type During Recession",
            ),
            &agg.by_vehicle_mean_expenditure,
        ),
    ]
}

pub fn yearly_figures(dataset: &Dataset, year: i32) -> Vec<Figure> {
    let agg = aggregate_yearly(dataset, year);
    vec![
        build_figure(
            ChartSpec::line(
                KeyColumn::Year,
                ValueColumn::AutomobileSales,
                "Yearly Automobile Sales Line Chart",
            ),
            &agg.yearly_mean,
        ),
        build_figure(
            ChartSpec::line(
                KeyColumn::Month,
                ValueColumn::AutomobileSales,
                "Total Monthly Automobile Sales Line Chart",
            ),
            &agg.monthly_sum,
        ),
        build_figure(
            ChartSpec::bar(
                KeyColumn::VehicleType,
                ValueColumn::AutomobileSales,
                format!("Average Vehicles Sold by Vehicle Type in the year {year}"),
            ),
            &agg.by_vehicle_mean,
        ),
        build_figure(
            ChartSpec::pie(
                KeyColumn::VehicleType,
                ValueColumn::AdvertisingExpenditure,
                "Total Advertisement Expenditure by Vehicle Type",
            ),
            &agg.by_vehicle_expenditure_sum,
        ),
    ]
}

fn chart_group(figures: Vec<Figure>) -> UiNode {
    UiNode::Container(
        Container::column(figures.into_iter().map(UiNode::Graph).collect())
            .with_class(CLASS_CHART_ITEM)
            .with_direction(Direction::Column),
    )
}

/// Subscribe both handlers to their inputs.
pub fn register(dispatcher: &mut Dispatcher) {
    dispatcher.subscribe("year-selector-enablement", &[REPORT_SELECTOR], |_, state| {
        vec![Output::SetDisabled {
            component: YEAR_SELECTOR.to_string(),
            disabled: year_selector_disabled(state.report.as_deref()),
        }]
    });

    dispatcher.subscribe(
        "render-output",
        &[REPORT_SELECTOR, YEAR_SELECTOR],
        |dataset, state| {
            let children = render_output(dataset, state.report.as_deref(), state.year);
            tracing::debug!(
                report = ?state.report,
                year = ?state.year,
                groups = children.as_ref().map(Vec::len).unwrap_or(0),
                "rendered output"
            );
            vec![Output::SetChildren {
                component: OUTPUT_CONTAINER.to_string(),
                children,
            }]
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::domain::SalesRecord;
    use crate::ui::{build_layout, InputChange};

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

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                rec(2000, "Jan", "Car", 100.0, 10.0, false),
                rec(2000, "Feb", "Car", 200.0, 20.0, false),
                rec(2001, "Jan", "Truck", 50.0, 5.0, true),
            ],
            "test",
        )
    }

    fn group_kinds(node: &UiNode) -> Vec<ChartKind> {
        let UiNode::Container(c) = node else {
            panic!("expected a chart group");
        };
        assert_eq!(c.class.as_deref(), Some(CLASS_CHART_ITEM));
        c.children
            .iter()
            .map(|n| match n {
                UiNode::Graph(f) => f.kind(),
                other => panic!("expected a graph, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn year_selector_truth_table() {
        assert!(!year_selector_disabled(Some("Yearly Statistics")));
        assert!(year_selector_disabled(Some("Recession Period Statistics")));
        assert!(year_selector_disabled(Some("")));
        assert!(year_selector_disabled(Some("Select Statistics")));
        assert!(year_selector_disabled(None));
    }

    #[test]
    fn idle_without_complete_selection() {
        let ds = dataset();
        assert_eq!(render_output(&ds, None, Some(2000)), None);
        assert_eq!(render_output(&ds, None, None), None);
        assert_eq!(render_output(&ds, Some("Yearly Statistics"), None), None);
        assert_eq!(render_output(&ds, Some("Select Statistics"), Some(2000)), None);
    }

    #[test]
    fn recession_layout_ignores_year() {
        let ds = dataset();
        let out = render_output(&ds, Some("Recession Period Statistics"), None).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(group_kinds(&out[0]), vec![ChartKind::Line, ChartKind::Bar]);
        assert_eq!(group_kinds(&out[1]), vec![ChartKind::Pie]);
        assert_eq!(
            render_output(&ds, Some("Recession Period Statistics"), Some(1900)),
            Some(out)
        );
    }

    #[test]
    fn yearly_layout_has_two_groups_of_two() {
        let ds = dataset();
        let out = render_output(&ds, Some("Yearly Statistics"), Some(2000)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(group_kinds(&out[0]), vec![ChartKind::Line, ChartKind::Line]);
        assert_eq!(group_kinds(&out[1]), vec![ChartKind::Bar, ChartKind::Pie]);
    }

    #[test]
    fn yearly_figures_follow_selected_year() {
        let figs = yearly_figures(&dataset(), 2000);
        assert_eq!(figs[0].points.len(), 1);
        assert_eq!(figs[0].points[0].label, "2000");
        assert_eq!(figs[0].points[0].value, 150.0);
        assert_eq!(figs[1].labels(), vec!["Jan", "Feb"]);
        assert_eq!(
            figs[2].title(),
            "Average Vehicles Sold by Vehicle Type in the year 2000"
        );
    }

    #[test]
    fn absent_year_renders_empty_charts() {
        let out = selection_figures(&dataset(), Some("Yearly Statistics"), Some(1999)).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(Figure::is_empty));
    }

    #[test]
    fn repeated_dispatch_is_idempotent() {
        let ds = dataset();
        let a = render_output(&ds, Some("Yearly Statistics"), Some(2000));
        let b = render_output(&ds, Some("Yearly Statistics"), Some(2000));
        assert_eq!(a, b);
    }

    #[test]
    fn registered_handlers_drive_the_tree() {
        let ds = dataset();
        let mut tree = build_layout(&ds);
        let mut dispatcher = Dispatcher::new();
        register(&mut dispatcher);

        dispatcher.initialize(&mut tree, &ds).unwrap();
        assert!(tree.dropdown(YEAR_SELECTOR).unwrap().disabled);
        assert!(tree.output().is_empty());

        let ran = dispatcher
            .dispatch(
                &mut tree,
                &ds,
                InputChange::new(REPORT_SELECTOR, Some("Yearly Statistics".to_string())),
            )
            .unwrap();
        assert_eq!(ran, vec!["year-selector-enablement", "render-output"]);
        assert!(!tree.dropdown(YEAR_SELECTOR).unwrap().disabled);
        assert_eq!(tree.output().len(), 2);

        // Clearing the year returns to idle.
        dispatcher
            .dispatch(&mut tree, &ds, InputChange::new(YEAR_SELECTOR, None))
            .unwrap();
        assert!(tree.output().is_empty());

        dispatcher
            .dispatch(
                &mut tree,
                &ds,
                InputChange::new(
                    REPORT_SELECTOR,
                    Some("Recession Period Statistics".to_string()),
                ),
            )
            .unwrap();
        assert!(tree.dropdown(YEAR_SELECTOR).unwrap().disabled);
        assert_eq!(tree.output().len(), 2);
    }
}
