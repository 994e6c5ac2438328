//! Ratatui-based terminal UI.
//!
//! The event loop here is the only driver of the dashboard: each key press
//! that changes a selector becomes one `InputChange`, which is dispatched to
//! completion before the next key is read. Drawing only reads the UI tree.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::Dashboard;
use crate::error::AppError;
use crate::ui::{Direction, Dropdown, UiNode, REPORT_SELECTOR, YEAR_SELECTOR};

mod plotters_chart;

use plotters_chart::FigureChart;

/// Heading colour of the dashboard title.
const HEADING_COLOR: Color = Color::Rgb(0x50, 0x3D, 0x36);

/// Selectors in focus order.
const SELECTORS: [&str; 2] = [REPORT_SELECTOR, YEAR_SELECTOR];

/// Start the TUI.
pub fn run(dashboard: Dashboard) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dashboard);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Result of one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Quit,
    Continue,
}

struct App {
    dashboard: Dashboard,
    /// Index into `SELECTORS`.
    focus: usize,
    status: String,
}

impl App {
    fn new(dashboard: Dashboard) -> Self {
        let status = format!(
            "Loaded {} rows from {}",
            dashboard.dataset().len(),
            dashboard.dataset().source()
        );
        Self {
            dashboard,
            focus: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? == KeyOutcome::Quit {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<KeyOutcome, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(KeyOutcome::Quit),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down | KeyCode::BackTab => self.move_focus(),
            KeyCode::Left => self.cycle_focused(-1)?,
            KeyCode::Right | KeyCode::Enter => self.cycle_focused(1)?,
            KeyCode::Backspace | KeyCode::Delete => self.set_focused(None)?,
            _ => {}
        }
        Ok(KeyOutcome::Continue)
    }

    fn focused_dropdown(&self) -> Option<&Dropdown> {
        self.dashboard.tree().dropdown(SELECTORS[self.focus])
    }

    /// Toggle focus between the selectors, skipping a disabled one.
    fn move_focus(&mut self) {
        let next = (self.focus + 1) % SELECTORS.len();
        let enabled = self
            .dashboard
            .tree()
            .dropdown(SELECTORS[next])
            .is_some_and(|d| !d.disabled);
        if enabled {
            self.focus = next;
        }
    }

    fn cycle_focused(&mut self, delta: i32) -> Result<(), AppError> {
        let Some(value) = self.focused_dropdown().map(|d| d.cycled_value(delta)) else {
            return Ok(());
        };
        self.set_focused(value)
    }

    fn set_focused(&mut self, value: Option<String>) -> Result<(), AppError> {
        let component = SELECTORS[self.focus];
        if self.focused_dropdown().is_none_or(|d| d.disabled) {
            return Ok(());
        }

        let ran = self.dashboard.change(component, value.clone())?;
        self.status = format!(
            "{component} = {} ({} handler(s))",
            value.as_deref().unwrap_or("-"),
            ran.len()
        );
        tracing::info!(component, value = ?value, handlers = ?ran, "input dispatched");

        // The year selector may have just been disabled under us.
        if self.focused_dropdown().is_some_and(|d| d.disabled) {
            self.focus = 0;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_selectors(frame, chunks[1]);
        self.draw_output(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tree = self.dashboard.tree();
        let heading = tree.heading().unwrap_or(tree.title.as_str());
        let p = Paragraph::new(Line::from(Span::styled(
            heading.to_string(),
            Style::default()
                .fg(Color::White)
                .bg(HEADING_COLOR)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(tree.title.as_str()));
        frame.render_widget(p, area);
    }

    fn draw_selectors(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let tree = self.dashboard.tree();
        let titles = [tree.label().unwrap_or("Report"), "Year"];
        for (idx, id) in SELECTORS.iter().enumerate() {
            if let Some(dropdown) = tree.dropdown(id) {
                draw_dropdown(frame, chunks[idx], titles[idx], dropdown, idx == self.focus);
            }
        }
    }

    fn draw_output(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let children = self.dashboard.tree().output();
        if children.is_empty() {
            let hint = Paragraph::new(
                "Choose \"Recession Period Statistics\", or \"Yearly Statistics\" and a year.",
            )
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(hint, area);
            return;
        }

        // The output region is a row of chart groups.
        draw_nodes(frame, area, children, Direction::Row);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab/↑/↓ focus  ←/→ change  Backspace clear  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_dropdown(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, dropdown: &Dropdown, focused: bool) {
    let style = if dropdown.disabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else if dropdown.value.is_none() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let text = format!("‹ {} ›", dropdown.display_value());
    let title = if dropdown.disabled {
        format!("{title} (disabled)")
    } else {
        title.to_string()
    };
    let p = Paragraph::new(Span::styled(text, style))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(p, area);
}

/// Split `area` evenly among `nodes` along `direction` and draw each.
fn draw_nodes(frame: &mut ratatui::Frame<'_>, area: Rect, nodes: &[UiNode], direction: Direction) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as u32;
    let layout_direction = match direction {
        Direction::Row => LayoutDirection::Horizontal,
        Direction::Column => LayoutDirection::Vertical,
    };
    let chunks = Layout::default()
        .direction(layout_direction)
        .constraints(nodes.iter().map(|_| Constraint::Ratio(1, n)))
        .split(area);

    for (node, rect) in nodes.iter().zip(chunks.iter()) {
        draw_node(frame, *rect, node);
    }
}

fn draw_node(frame: &mut ratatui::Frame<'_>, area: Rect, node: &UiNode) {
    match node {
        UiNode::Container(c) => draw_nodes(frame, area, &c.children, c.direction),
        UiNode::Graph(figure) => {
            let block = Block::default().title(figure.title()).borders(Borders::ALL);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Clear, inner);
            frame.render_widget(FigureChart { figure }, inner);
        }
        UiNode::Heading(text) | UiNode::Label(text) => {
            frame.render_widget(Paragraph::new(text.as_str()), area);
        }
        UiNode::Dropdown(dropdown) => draw_dropdown(frame, area, &dropdown.id, dropdown, false),
    }
}
