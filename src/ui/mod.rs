//! Explicit UI tree for the dashboard.
//!
//! The tree is plain data: the terminal front end only reads it, and the
//! dispatcher (`events`) is the only writer. Components that handlers read
//! from or write to carry a string id.

use crate::chart::Figure;
use crate::domain::{Dataset, ReportType};
use crate::error::AppError;

pub mod events;

pub use events::{Dispatcher, EventQueue, InputChange, Output};

pub const PAGE_TITLE: &str = "Automobile Statistics Dashboard";
pub const HEADING: &str = "Automobile Sales Statistics Dashboard";

pub const REPORT_SELECTOR: &str = "dropdown-statistics";
pub const YEAR_SELECTOR: &str = "select-year";
pub const OUTPUT_CONTAINER: &str = "output-container";

/// Class of the output region (groups laid out side by side).
pub const CLASS_GRID: &str = "grid-chart";
/// Class of one group of charts inside the output region.
pub const CLASS_CHART_ITEM: &str = "chart-item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: Option<String>,
    pub class: Option<String>,
    pub direction: Direction,
    pub children: Vec<UiNode>,
}

impl Container {
    pub fn column(children: Vec<UiNode>) -> Self {
        Self {
            id: None,
            class: None,
            direction: Direction::Column,
            children,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single-choice selector. `value == None` means nothing is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: Option<String>,
    pub placeholder: String,
    pub disabled: bool,
}

impl Dropdown {
    /// Label shown for the current value (the raw value if it is not an option).
    pub fn display_value(&self) -> &str {
        match &self.value {
            None => &self.placeholder,
            Some(v) => self
                .options
                .iter()
                .find(|o| &o.value == v)
                .map(|o| o.label.as_str())
                .unwrap_or(v),
        }
    }

    /// Step through `[unset, options...]`, wrapping at both ends.
    pub fn cycled_value(&self, delta: i32) -> Option<String> {
        let slots = self.options.len() as i64 + 1;
        let current = self
            .value
            .as_ref()
            .and_then(|v| self.options.iter().position(|o| &o.value == v))
            .map(|i| i as i64 + 1)
            .unwrap_or(0);
        let next = (current + delta as i64).rem_euclid(slots);
        if next == 0 {
            None
        } else {
            Some(self.options[(next - 1) as usize].value.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    Container(Container),
    Heading(String),
    Label(String),
    Dropdown(Dropdown),
    Graph(Figure),
}

/// Values of the two selectors, as read by the handlers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub report: Option<String>,
    pub year: Option<i32>,
}

impl UiState {
    pub fn report_type(&self) -> Option<ReportType> {
        self.report.as_deref().and_then(ReportType::from_label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiTree {
    pub title: String,
    pub root: UiNode,
}

impl UiTree {
    pub fn dropdown(&self, id: &str) -> Option<&Dropdown> {
        find_dropdown(&self.root, id)
    }

    pub fn dropdown_mut(&mut self, id: &str) -> Option<&mut Dropdown> {
        find_dropdown_mut(&mut self.root, id)
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        find_container(&self.root, id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        find_container_mut(&mut self.root, id)
    }

    /// First heading text in document order.
    pub fn heading(&self) -> Option<&str> {
        find_text(&self.root, &|n| match n {
            UiNode::Heading(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// First label text in document order.
    pub fn label(&self) -> Option<&str> {
        find_text(&self.root, &|n| match n {
            UiNode::Label(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Current selector values. A year value that does not parse counts as unset.
    pub fn state(&self) -> UiState {
        UiState {
            report: self.dropdown(REPORT_SELECTOR).and_then(|d| d.value.clone()),
            year: self
                .dropdown(YEAR_SELECTOR)
                .and_then(|d| d.value.as_deref())
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Children of the output region (empty while idle).
    pub fn output(&self) -> &[UiNode] {
        self.container(OUTPUT_CONTAINER)
            .map(|c| c.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn apply(&mut self, output: Output) -> Result<(), AppError> {
        match output {
            Output::SetDisabled {
                component,
                disabled,
            } => {
                let dd = self
                    .dropdown_mut(&component)
                    .ok_or_else(|| unknown_component(&component))?;
                dd.disabled = disabled;
            }
            Output::SetChildren {
                component,
                children,
            } => {
                let c = self
                    .container_mut(&component)
                    .ok_or_else(|| unknown_component(&component))?;
                c.children = children.unwrap_or_default();
            }
        }
        Ok(())
    }
}

fn unknown_component(id: &str) -> AppError {
    AppError::runtime(format!("No UI component with id '{id}'."))
}

fn find_text<'a>(node: &'a UiNode, pick: &dyn Fn(&'a UiNode) -> Option<&'a str>) -> Option<&'a str> {
    if let Some(t) = pick(node) {
        return Some(t);
    }
    match node {
        UiNode::Container(c) => c.children.iter().find_map(|n| find_text(n, pick)),
        _ => None,
    }
}

fn find_dropdown<'a>(node: &'a UiNode, id: &str) -> Option<&'a Dropdown> {
    match node {
        UiNode::Dropdown(d) if d.id == id => Some(d),
        UiNode::Container(c) => c.children.iter().find_map(|n| find_dropdown(n, id)),
        _ => None,
    }
}

fn find_dropdown_mut<'a>(node: &'a mut UiNode, id: &str) -> Option<&'a mut Dropdown> {
    match node {
        UiNode::Dropdown(d) if d.id == id => Some(d),
        UiNode::Container(c) => c.children.iter_mut().find_map(|n| find_dropdown_mut(n, id)),
        _ => None,
    }
}

fn find_container<'a>(node: &'a UiNode, id: &str) -> Option<&'a Container> {
    match node {
        UiNode::Container(c) if c.id.as_deref() == Some(id) => Some(c),
        UiNode::Container(c) => c.children.iter().find_map(|n| find_container(n, id)),
        _ => None,
    }
}

fn find_container_mut<'a>(node: &'a mut UiNode, id: &str) -> Option<&'a mut Container> {
    match node {
        UiNode::Container(c) => {
            if c.id.as_deref() == Some(id) {
                return Some(c);
            }
            c.children.iter_mut().find_map(|n| find_container_mut(n, id))
        }
        _ => None,
    }
}

/// Static dashboard shell: heading, the two selectors, and an empty output region.
pub fn build_layout(dataset: &Dataset) -> UiTree {
    let report = Dropdown {
        id: REPORT_SELECTOR.to_string(),
        options: ReportType::ALL
            .iter()
            .map(|r| DropdownOption::new(r.label(), r.label()))
            .collect(),
        value: None,
        placeholder: "Select a report type.".to_string(),
        disabled: false,
    };

    let year = Dropdown {
        id: YEAR_SELECTOR.to_string(),
        options: dataset
            .years()
            .into_iter()
            .map(|y| DropdownOption::new(y.to_string(), y.to_string()))
            .collect(),
        value: dataset.min_year().map(|y| y.to_string()),
        placeholder: "Select a year.".to_string(),
        disabled: false,
    };

    let output = Container::column(Vec::new())
        .with_id(OUTPUT_CONTAINER)
        .with_class(CLASS_GRID)
        .with_direction(Direction::Row);

    let root = Container::column(vec![
        UiNode::Heading(HEADING.to_string()),
        UiNode::Container(Container::column(vec![
            UiNode::Label("Select Statistics:".to_string()),
            UiNode::Dropdown(report),
        ])),
        UiNode::Container(Container::column(vec![UiNode::Dropdown(year)])),
        UiNode::Container(Container::column(vec![UiNode::Container(output)])),
    ]);

    UiTree {
        title: PAGE_TITLE.to_string(),
        root: UiNode::Container(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;

    fn dataset() -> Dataset {
        let rec = |year| SalesRecord {
            year,
            month: "Jan".to_string(),
            vehicle_type: "Car".to_string(),
            automobile_sales: 1.0,
            advertising_expenditure: 1.0,
            recession: false,
        };
        Dataset::new(vec![rec(1982), rec(1980), rec(1981), rec(1980)], "test")
    }

    #[test]
    fn layout_has_both_selectors_and_empty_output() {
        let tree = build_layout(&dataset());
        assert_eq!(tree.title, PAGE_TITLE);
        assert_eq!(tree.heading(), Some(HEADING));
        assert_eq!(tree.label(), Some("Select Statistics:"));

        let report = tree.dropdown(REPORT_SELECTOR).unwrap();
        assert_eq!(report.value, None);
        assert_eq!(report.display_value(), "Select a report type.");
        assert_eq!(
            report.options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>(),
            vec!["Yearly Statistics", "Recession Period Statistics"]
        );

        let year = tree.dropdown(YEAR_SELECTOR).unwrap();
        assert_eq!(
            year.options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>(),
            vec!["1980", "1981", "1982"]
        );
        assert_eq!(year.value.as_deref(), Some("1980"));

        assert!(tree.output().is_empty());
        assert_eq!(
            tree.container(OUTPUT_CONTAINER).unwrap().direction,
            Direction::Row
        );
    }

    #[test]
    fn state_reads_selector_values() {
        let mut tree = build_layout(&dataset());
        assert_eq!(
            tree.state(),
            UiState {
                report: None,
                year: Some(1980)
            }
        );
        tree.dropdown_mut(REPORT_SELECTOR).unwrap().value = Some("Yearly Statistics".to_string());
        assert_eq!(tree.state().report_type(), Some(ReportType::Yearly));
    }

    #[test]
    fn cycling_wraps_through_unset() {
        let tree = build_layout(&dataset());
        let report = tree.dropdown(REPORT_SELECTOR).unwrap();
        assert_eq!(report.cycled_value(1).as_deref(), Some("Yearly Statistics"));
        assert_eq!(report.cycled_value(2).as_deref(), Some("Recession Period Statistics"));
        assert_eq!(report.cycled_value(3), None);
        assert_eq!(report.cycled_value(-1).as_deref(), Some("Recession Period Statistics"));

        let year = tree.dropdown(YEAR_SELECTOR).unwrap();
        assert_eq!(year.cycled_value(1).as_deref(), Some("1981"));
        assert_eq!(year.cycled_value(-1), None);
    }

    #[test]
    fn apply_updates_named_components() {
        let mut tree = build_layout(&dataset());
        tree.apply(Output::SetDisabled {
            component: YEAR_SELECTOR.to_string(),
            disabled: true,
        })
        .unwrap();
        assert!(tree.dropdown(YEAR_SELECTOR).unwrap().disabled);

        tree.apply(Output::SetChildren {
            component: OUTPUT_CONTAINER.to_string(),
            children: Some(vec![UiNode::Label("x".to_string())]),
        })
        .unwrap();
        assert_eq!(tree.output().len(), 1);

        tree.apply(Output::SetChildren {
            component: OUTPUT_CONTAINER.to_string(),
            children: None,
        })
        .unwrap();
        assert!(tree.output().is_empty());

        let err = tree
            .apply(Output::SetDisabled {
                component: "nope".to_string(),
                disabled: true,
            })
            .unwrap_err();
        assert!(err.message().contains("nope"));
    }
}
