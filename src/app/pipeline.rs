//! Shared dashboard logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset load -> layout -> handler registration -> initial render
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::chart::Figure;
use crate::controller;
use crate::data::{load_dataset, DataSource};
use crate::domain::{Dataset, ReportType};
use crate::error::AppError;
use crate::ui::{build_layout, Dispatcher, EventQueue, InputChange, UiTree};

/// Load the dataset once for the lifetime of the process.
pub fn load(source: &DataSource) -> Result<Dataset, AppError> {
    load_dataset(source)
}

/// Figures for a selection made on the command line.
pub fn run_selection(dataset: &Dataset, report: ReportType, year: Option<i32>) -> Option<Vec<Figure>> {
    controller::selection_figures(dataset, Some(report.label()), year)
}

/// Dataset + UI tree + wired handlers: everything an interactive front end drives.
pub struct Dashboard {
    dataset: Dataset,
    tree: UiTree,
    dispatcher: Dispatcher,
    queue: EventQueue,
}

impl Dashboard {
    /// Build the layout, subscribe the handlers, and run the initial render.
    pub fn new(dataset: Dataset) -> Result<Self, AppError> {
        let mut tree = build_layout(&dataset);
        let mut dispatcher = Dispatcher::new();
        controller::register(&mut dispatcher);
        dispatcher.initialize(&mut tree, &dataset)?;

        Ok(Self {
            dataset,
            tree,
            dispatcher,
            queue: EventQueue::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn submit(&mut self, event: InputChange) {
        self.queue.push(event);
    }

    /// Dispatch every queued event; returns the handlers that ran.
    pub fn process(&mut self) -> Result<Vec<&'static str>, AppError> {
        self.queue.drain(&self.dispatcher, &mut self.tree, &self.dataset)
    }

    /// Submit one change and process it immediately.
    pub fn change(&mut self, component: &str, value: Option<String>) -> Result<Vec<&'static str>, AppError> {
        self.submit(InputChange::new(component, value));
        self.process()
    }
}
