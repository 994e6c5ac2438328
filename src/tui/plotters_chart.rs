//! Plotters-powered figure widget for Ratatui.
//!
//! Line and bar figures are drawn with Plotters into the Ratatui buffer via
//! `plotters-ratatui-backend`. Pie figures are drawn directly as one coloured
//! share bar per slice: a circle does not survive terminal cell aspect ratios.

use plotters::prelude::*;
// `ratatui::style::Color` shadows the prelude's trait; `filled()` still needs it.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{ChartKind, Figure};

/// Slice/series colours, high-contrast for terminals.
const PALETTE: [(u8, u8, u8); 6] = [
    (0, 200, 255),
    (255, 170, 0),
    (0, 220, 120),
    (255, 80, 80),
    (190, 120, 255),
    (240, 240, 90),
];

/// A render-only view over one figure.
pub struct FigureChart<'a> {
    pub figure: &'a Figure,
}

impl<'a> Widget for FigureChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.figure.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No data for this selection.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        match self.figure.kind() {
            ChartKind::Pie => render_shares(self.figure, area, buf),
            ChartKind::Line | ChartKind::Bar => render_cartesian(self.figure, area, buf),
        }
    }
}

fn render_cartesian(figure: &Figure, area: Rect, buf: &mut Buffer) {
    // When the available area is too small, Plotters may fail to build a chart.
    if area.width < 20 || area.height < 6 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(Color::Yellow),
        );
        return;
    }

    let Some([y0, y1]) = figure.value_bounds() else {
        return;
    };
    let n = figure.points.len();
    let (x0, x1) = (-0.5, n as f64 - 0.5);

    let kind = figure.kind();
    let labels: Vec<String> = figure.points.iter().map(|p| p.label.clone()).collect();
    let values: Vec<(f64, f64)> = figure
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let x_desc = figure.spec.x.column_name();
    let y_desc = figure.spec.y.column_name();

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            // Terminal cells are low-res, so keep label areas compact.
            .set_label_area_size(LabelAreaPosition::Left, 8)
            .set_label_area_size(LabelAreaPosition::Bottom, 2)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_labels(labels.len().clamp(2, 12))
            .y_labels(5)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .y_label_formatter(&|v| fmt_value(*v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        let (r, g, b) = PALETTE[0];
        let color = RGBColor(r, g, b);
        match kind {
            ChartKind::Bar => {
                chart.draw_series(values.iter().map(|&(x, y)| {
                    Rectangle::new([(x - 0.35, 0.0), (x + 0.35, y)], color.filled())
                }))?;
            }
            _ => {
                chart.draw_series(LineSeries::new(values.iter().copied(), &color))?;
                // Pixels mark the actual data points (a lone point has no line).
                chart.draw_series(values.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
            }
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn render_shares(figure: &Figure, area: Rect, buf: &mut Buffer) {
    let shares = figure.shares();
    if shares.is_empty() {
        buf.set_string(
            area.x,
            area.y,
            "No positive values to share.",
            Style::default().fg(Color::Yellow),
        );
        return;
    }

    let label_w = shares
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(1)
        .min(18) as u16;
    // label, space, bar, space, "100.0%"
    let bar_w = area.width.saturating_sub(label_w + 8);

    for (row, (label, share)) in shares.iter().enumerate() {
        let y = area.y + row as u16;
        if y >= area.y + area.height {
            break;
        }
        let (r, g, b) = PALETTE[row % PALETTE.len()];
        let style = Style::default().fg(Color::Rgb(r, g, b));

        let label = crate::chart::ascii::truncate(label, label_w as usize);
        buf.set_string(area.x, y, &label, Style::default().fg(Color::Gray));

        let len = (share * bar_w as f64).round() as usize;
        let bar_x = area.x + label_w + 1;
        buf.set_string(bar_x, y, "█".repeat(len), style);
        buf.set_string(
            bar_x + len as u16 + 1,
            y,
            format!("{:.1}%", share * 100.0),
            style,
        );
    }
}

/// Tick label for a categorical axis: only whole positions carry a label.
fn category_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn fmt_value(v: f64) -> String {
    if v.abs() >= 10_000.0 {
        format!("{:.0}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}
