//! Chart descriptions built from aggregated series.
//!
//! A `Figure` is render-agnostic: the TUI draws it with Plotters, the CLI
//! draws it as text (`ascii`), and `io::export` serializes it. Building one
//! never fails; an empty series simply yields a figure with no points.

use serde::{Deserialize, Serialize};

use crate::domain::{AggregatedSeries, KeyColumn, ValueColumn};

pub mod ascii;

pub use ascii::render_ascii;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// x = ordinal key, y = value.
    Line,
    /// x = categorical key, y = value.
    Bar,
    /// names = categorical key, values = value.
    Pie,
}

impl ChartKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

/// Structured chart configuration: what to draw and which columns feed it.
///
/// For pie charts `x` names the slices and `y` sizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: KeyColumn,
    pub y: ValueColumn,
    pub title: String,
}

impl ChartSpec {
    pub fn line(x: KeyColumn, y: ValueColumn, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, x, y, title)
    }

    pub fn bar(x: KeyColumn, y: ValueColumn, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, x, y, title)
    }

    pub fn pie(names: KeyColumn, values: ValueColumn, title: impl Into<String>) -> Self {
        Self::new(ChartKind::Pie, names, values, title)
    }

    fn new(kind: ChartKind, x: KeyColumn, y: ValueColumn, title: impl Into<String>) -> Self {
        Self {
            kind,
            x,
            y,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigurePoint {
    pub label: String,
    pub value: f64,
}

/// A renderable chart: its spec plus the labelled points, in series order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub spec: ChartSpec,
    pub points: Vec<FigurePoint>,
}

/// Map an aggregated series onto a chart spec.
pub fn build_figure(spec: ChartSpec, series: &AggregatedSeries) -> Figure {
    if spec.x != series.key || spec.y != series.value {
        tracing::debug!(
            title = %spec.title,
            "chart bindings differ from series columns ({} / {})",
            series.key.column_name(),
            series.value.column_name()
        );
    }

    let points = series
        .points
        .iter()
        .map(|(key, value)| FigurePoint {
            label: key.to_string(),
            value: *value,
        })
        .collect();

    Figure { spec, points }
}

impl Figure {
    pub fn kind(&self) -> ChartKind {
        self.spec.kind
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Padded y-axis bounds. Bar charts always include the zero baseline.
    ///
    /// `None` when there is nothing finite to plot.
    pub fn value_bounds(&self) -> Option<[f64; 2]> {
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            if p.value.is_finite() {
                lo = lo.min(p.value);
                hi = hi.max(p.value);
            }
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        if self.spec.kind == ChartKind::Bar {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }

        let span = hi - lo;
        let pad = if span > 0.0 {
            span * 0.05
        } else {
            lo.abs().max(1.0) * 0.05
        };
        Some([lo - pad, hi + pad])
    }

    /// Pie slice fractions, in point order. Empty if the total is not positive.
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total: f64 = self
            .points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite() && *v > 0.0)
            .sum();
        if !(total.is_finite() && total > 0.0) {
            return Vec::new();
        }
        self.points
            .iter()
            .map(|p| {
                let v = if p.value.is_finite() { p.value.max(0.0) } else { 0.0 };
                (p.label.as_str(), v / total)
            })
            .collect()
    }
}
