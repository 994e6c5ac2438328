//! Plain-text chart rendering for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid or one row per category),
//! optimized for:
//! - quick visual sanity checks from `autodash report`
//! - deterministic output (helpful for golden tests)
//!
//! Elements:
//! - line charts: `o` at each point, `-` between consecutive points
//! - bar charts: one horizontal `#` bar per category
//! - pie charts: one `#` bar per slice, sized by its share, with a percentage

use crate::chart::{ChartKind, Figure};

/// Widest label column used for bar/pie rows.
const MAX_LABEL_WIDTH: usize = 20;
/// Columns reserved after the bar for the value/percentage text.
const VALUE_COLUMNS: usize = 12;

/// Render a figure as text. `width`/`height` bound the drawing area.
pub fn render_ascii(figure: &Figure, width: usize, height: usize) -> String {
    let mut out = format!("== {} ==\n", figure.title());

    if figure.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    match figure.kind() {
        ChartKind::Line => render_line(&mut out, figure, width, height),
        ChartKind::Bar => render_bars(&mut out, figure, width),
        ChartKind::Pie => render_pie(&mut out, figure, width),
    }
    out
}

fn render_line(out: &mut String, figure: &Figure, width: usize, height: usize) {
    let width = width.max(10);
    let height = height.max(5);
    let Some([y_min, y_max]) = figure.value_bounds() else {
        out.push_str("(no finite values)\n");
        return;
    };

    let n = figure.points.len();
    let cells: Vec<(usize, usize)> = figure
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (map_x(i, n, width), map_y(p.value, y_min, y_max, height)))
        .collect();

    let mut grid = vec![vec![' '; width]; height];
    for pair in cells.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    out.push_str(&format!("y=[{y_min:.2}, {y_max:.2}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let first = &figure.points[0].label;
    let last = &figure.points[n - 1].label;
    out.push_str(&format!("x: {first} .. {last}\n"));
}

fn render_bars(out: &mut String, figure: &Figure, width: usize) {
    let label_w = label_width(figure);
    let bar_w = bar_width(width, label_w);
    let max_abs = figure
        .points
        .iter()
        .map(|p| p.value.abs())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    for p in &figure.points {
        let len = if max_abs > 0.0 && p.value.is_finite() && p.value > 0.0 {
            ((p.value / max_abs) * bar_w as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label_w$} |{} {:.2}\n",
            truncate(&p.label, label_w),
            "#".repeat(len),
            p.value,
        ));
    }
}

fn render_pie(out: &mut String, figure: &Figure, width: usize) {
    let shares = figure.shares();
    if shares.is_empty() {
        out.push_str("(no positive values)\n");
        return;
    }

    let label_w = label_width(figure);
    let bar_w = bar_width(width, label_w);
    for (label, share) in shares {
        let len = (share * bar_w as f64).round() as usize;
        out.push_str(&format!(
            "{:<label_w$} |{} {:.1}%\n",
            truncate(label, label_w),
            "#".repeat(len),
            share * 100.0,
        ));
    }
}

fn label_width(figure: &Figure) -> usize {
    figure
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(1)
        .clamp(1, MAX_LABEL_WIDTH)
}

fn bar_width(width: usize, label_w: usize) -> usize {
    width.saturating_sub(label_w + VALUE_COLUMNS).max(1)
}

/// Spread `n` ordinal points evenly across the grid; a lone point is centered.
fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return (width - 1) / 2;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = if y.is_finite() {
        ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only writes into blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartSpec, FigurePoint};
    use crate::domain::{KeyColumn, ValueColumn};

    fn figure(spec: ChartSpec, points: &[(&str, f64)]) -> Figure {
        Figure {
            spec,
            points: points
                .iter()
                .map(|(l, v)| FigurePoint {
                    label: l.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn single_point_line_golden() {
        let fig = figure(
            ChartSpec::line(KeyColumn::Year, ValueColumn::AutomobileSales, "Yearly"),
            &[("2000", 150.0)],
        );
        let expected = concat!(
            "== Yearly ==\n",
            "y=[142.50, 157.50]\n",
            "          \n",
            "          \n",
            "    o     \n",
            "          \n",
            "          \n",
            "x: 2000 .. 2000\n",
        );
        assert_eq!(render_ascii(&fig, 10, 5), expected);
    }

    #[test]
    fn rising_line_connects_corners() {
        let fig = figure(
            ChartSpec::line(KeyColumn::Month, ValueColumn::AutomobileSales, "Monthly"),
            &[("Jan", 100.0), ("Feb", 200.0)],
        );
        let txt = render_ascii(&fig, 10, 5);
        let rows: Vec<&str> = txt.lines().skip(2).take(5).collect();
        assert_eq!(rows[4].chars().next(), Some('o'));
        assert_eq!(rows[0].chars().nth(9), Some('o'));
        assert!(rows.iter().any(|r| r.contains('-')));
        assert!(txt.ends_with("x: Jan .. Feb\n"));
    }

    #[test]
    fn bars_scale_to_largest_value() {
        let fig = figure(
            ChartSpec::bar(KeyColumn::VehicleType, ValueColumn::AutomobileSales, "Avg"),
            &[("Car", 50.0), ("Truck", 100.0)],
        );
        let expected = concat!(
            "== Avg ==\n",
            "Car   |####### 50.00\n",
            "Truck |############# 100.00\n",
        );
        assert_eq!(render_ascii(&fig, 30, 5), expected);
    }

    #[test]
    fn pie_rows_show_percentages() {
        let fig = figure(
            ChartSpec::pie(KeyColumn::VehicleType, ValueColumn::AdvertisingExpenditure, "Share"),
            &[("a", 1.0), ("b", 3.0)],
        );
        let txt = render_ascii(&fig, 24, 5);
        assert!(txt.contains("25.0%"));
        assert!(txt.contains("75.0%"));
    }

    #[test]
    fn empty_figure_renders_placeholder() {
        let fig = figure(
            ChartSpec::pie(KeyColumn::VehicleType, ValueColumn::AdvertisingExpenditure, "Share"),
            &[],
        );
        assert_eq!(render_ascii(&fig, 40, 10), "== Share ==\n(no data)\n");
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("Mediumfamilycar", 6), "Mediu.");
        assert_eq!(truncate("Car", 6), "Car");
    }
}
