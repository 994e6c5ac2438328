//! Input-change events and the handler dispatcher.
//!
//! Handlers subscribe to one or more named input components. Dispatching an
//! event writes the new value into the tree, then runs every handler that
//! subscribed to that component, in registration order, applying each
//! handler's outputs before the next one runs. Everything happens on the
//! caller's thread and runs to completion.

use std::collections::VecDeque;

use crate::domain::Dataset;
use crate::error::AppError;
use crate::ui::{UiNode, UiState, UiTree};

/// A selector changed value. `value == None` means it was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChange {
    pub component: String,
    pub value: Option<String>,
}

impl InputChange {
    pub fn new(component: &str, value: Option<String>) -> Self {
        Self {
            component: component.to_string(),
            value,
        }
    }
}

/// A write a handler wants applied to the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    SetDisabled {
        component: String,
        disabled: bool,
    },
    /// `None` clears the container (idle display).
    SetChildren {
        component: String,
        children: Option<Vec<UiNode>>,
    },
}

type Handler = Box<dyn Fn(&Dataset, &UiState) -> Vec<Output>>;

struct Subscription {
    name: &'static str,
    inputs: Vec<String>,
    handler: Handler,
}

#[derive(Default)]
pub struct Dispatcher {
    subscriptions: Vec<Subscription>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, name: &'static str, inputs: &[&str], handler: F)
    where
        F: Fn(&Dataset, &UiState) -> Vec<Output> + 'static,
    {
        self.subscriptions.push(Subscription {
            name,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            handler: Box::new(handler),
        });
    }

    /// Names of handlers subscribed to `component`, in run order.
    pub fn subscribers(&self, component: &str) -> Vec<&'static str> {
        self.subscriptions
            .iter()
            .filter(|s| s.inputs.iter().any(|i| i == component))
            .map(|s| s.name)
            .collect()
    }

    /// Run every handler once against the current tree (initial render).
    pub fn initialize(&self, tree: &mut UiTree, dataset: &Dataset) -> Result<Vec<&'static str>, AppError> {
        let mut ran = Vec::with_capacity(self.subscriptions.len());
        for sub in &self.subscriptions {
            run_handler(sub, tree, dataset)?;
            ran.push(sub.name);
        }
        Ok(ran)
    }

    /// Apply one input change and run its subscribers.
    ///
    /// Changes to a disabled selector and changes that leave the value as it
    /// was are ignored; the returned list of handler names is then empty.
    pub fn dispatch(
        &self,
        tree: &mut UiTree,
        dataset: &Dataset,
        event: InputChange,
    ) -> Result<Vec<&'static str>, AppError> {
        let dropdown = tree.dropdown_mut(&event.component).ok_or_else(|| {
            AppError::runtime(format!("No input component with id '{}'.", event.component))
        })?;
        if dropdown.disabled || dropdown.value == event.value {
            tracing::debug!(component = %event.component, "input change ignored");
            return Ok(Vec::new());
        }
        dropdown.value = event.value.clone();
        tracing::debug!(component = %event.component, value = ?event.value, "input changed");

        let mut ran = Vec::new();
        for sub in self
            .subscriptions
            .iter()
            .filter(|s| s.inputs.iter().any(|i| *i == event.component))
        {
            run_handler(sub, tree, dataset)?;
            ran.push(sub.name);
        }
        Ok(ran)
    }
}

fn run_handler(sub: &Subscription, tree: &mut UiTree, dataset: &Dataset) -> Result<(), AppError> {
    // Each handler sees the outputs of the handlers that ran before it.
    let state = tree.state();
    let outputs = (sub.handler)(dataset, &state);
    tracing::debug!(handler = sub.name, outputs = outputs.len(), "handler ran");
    for output in outputs {
        tree.apply(output)?;
    }
    Ok(())
}

/// FIFO of pending input changes, drained one event at a time.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<InputChange>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputChange) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Dispatch every pending event in arrival order; returns the names of
    /// handlers that ran, in order.
    pub fn drain(
        &mut self,
        dispatcher: &Dispatcher,
        tree: &mut UiTree,
        dataset: &Dataset,
    ) -> Result<Vec<&'static str>, AppError> {
        let mut ran = Vec::new();
        while let Some(event) = self.pending.pop_front() {
            ran.extend(dispatcher.dispatch(tree, dataset, event)?);
        }
        Ok(ran)
    }
}
