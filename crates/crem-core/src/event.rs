//! Structured model events and their listeners.
//!
//! A model broadcasts what it does (actions tried, accepted and rejected,
//! variable snapshots, free-form notes) as [`ModelEvent`]s. Listeners are
//! registered on a [`ModelEventSupport`] and called synchronously in
//! registration order.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use crem_core::event::{CountingEventListener, EventCategory, ModelEvent, ModelEventSupport};
//!
//! let counter = Arc::new(CountingEventListener::new());
//! let mut support = ModelEventSupport::new();
//! support.add_listener(counter.clone());
//!
//! support.fire(&ModelEvent::note("Catchment", "Initialising"));
//! assert_eq!(counter.count(EventCategory::Note), 1);
//! ```

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

/// What an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Model,
    ManagementAction,
    DecisionVariable,
    Note,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EventCategory::Model => "Model",
            EventCategory::ManagementAction => "ManagementAction",
            EventCategory::DecisionVariable => "DecisionVariable",
            EventCategory::Note => "Note",
        };
        f.write_str(text)
    }
}

/// Value of a named event attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Unsigned(u64),
    Flag(bool),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => f.write_str(text),
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Unsigned(value) => write!(f, "{}", value),
            AttributeValue::Flag(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Unsigned(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

/// A single structured event emitted by a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvent {
    category: EventCategory,
    source: String,
    attributes: Vec<(&'static str, AttributeValue)>,
    note: Option<String>,
}

impl ModelEvent {
    pub fn new(category: EventCategory, source: impl Into<String>) -> Self {
        Self {
            category,
            source: source.into(),
            attributes: Vec::new(),
            note: None,
        }
    }

    /// Creates a free-form note event.
    pub fn note(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(EventCategory::Note, source).with_note(text)
    }

    pub fn with_note(mut self, text: impl Into<String>) -> Self {
        self.note = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Name of the model that emitted the event.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn attributes(&self) -> &[(&'static str, AttributeValue)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.source)?;
        for (name, value) in &self.attributes {
            write!(f, " {}={}", name, value)?;
        }
        if let Some(note) = &self.note {
            write!(f, ": {}", note)?;
        }
        Ok(())
    }
}

/// Receives every event a model fires.
pub trait ModelEventListener: Send + Sync + Debug {
    fn on_event(&self, event: &ModelEvent);
}

/// Central event broadcaster for a model.
#[derive(Clone, Default)]
pub struct ModelEventSupport {
    listeners: Vec<Arc<dyn ModelEventListener>>,
}

impl ModelEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ModelEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire(&self, event: &ModelEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for ModelEventSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Forwards events to `tracing`.
///
/// Notes are logged at INFO, everything else at DEBUG.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ModelEventListener for LoggingEventListener {
    fn on_event(&self, event: &ModelEvent) {
        match event.category() {
            EventCategory::Note => info!(
                event = "model_note",
                source = event.source(),
                "{}{}",
                self.prefix,
                event
            ),
            category => debug!(
                event = "model_event",
                category = %category,
                source = event.source(),
                "{}{}",
                self.prefix,
                event
            ),
        }
    }
}

/// Counts events per category.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    model: AtomicUsize,
    management_action: AtomicUsize,
    decision_variable: AtomicUsize,
    note: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, category: EventCategory) -> &AtomicUsize {
        match category {
            EventCategory::Model => &self.model,
            EventCategory::ManagementAction => &self.management_action,
            EventCategory::DecisionVariable => &self.decision_variable,
            EventCategory::Note => &self.note,
        }
    }

    pub fn count(&self, category: EventCategory) -> usize {
        self.counter(category).load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.model.load(Ordering::SeqCst)
            + self.management_action.load(Ordering::SeqCst)
            + self.decision_variable.load(Ordering::SeqCst)
            + self.note.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.model.store(0, Ordering::SeqCst);
        self.management_action.store(0, Ordering::SeqCst);
        self.decision_variable.store(0, Ordering::SeqCst);
        self.note.store(0, Ordering::SeqCst);
    }
}

impl ModelEventListener for CountingEventListener {
    fn on_event(&self, event: &ModelEvent) {
        self.counter(event.category()).fetch_add(1, Ordering::SeqCst);
    }
}

/// Keeps a copy of every event it receives.
#[derive(Debug, Default)]
pub struct RecordingEventListener {
    events: Mutex<Vec<ModelEvent>>,
}

impl RecordingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ModelEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Note texts of all recorded events, in arrival order.
    pub fn notes(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| event.note_text().map(str::to_string))
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl ModelEventListener for RecordingEventListener {
    fn on_event(&self, event: &ModelEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_support_fires_in_order() {
        let recorder = Arc::new(RecordingEventListener::new());
        let counter = Arc::new(CountingEventListener::new());
        let mut support = ModelEventSupport::new();
        support.add_listener(recorder.clone());
        support.add_listener(counter.clone());
        assert_eq!(support.listener_count(), 2);

        support.fire(&ModelEvent::note("Catchment", "first"));
        support.fire(
            &ModelEvent::new(EventCategory::ManagementAction, "Catchment")
                .with_attribute("PlanningUnit", 18u64)
                .with_attribute("IsActive", true)
                .with_note("second"),
        );

        assert_eq!(recorder.notes(), vec!["first", "second"]);
        assert_eq!(counter.count(EventCategory::Note), 1);
        assert_eq!(counter.count(EventCategory::ManagementAction), 1);
        assert_eq!(counter.total(), 2);

        counter.reset();
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn test_event_attributes() {
        let event = ModelEvent::new(EventCategory::DecisionVariable, "Catchment")
            .with_attribute("Name", "SedimentProduction")
            .with_attribute("Value", 12.5);

        assert_eq!(
            event.attribute("Name"),
            Some(&AttributeValue::Text("SedimentProduction".to_string()))
        );
        assert_eq!(event.attribute("Missing"), None);
        assert_eq!(
            event.to_string(),
            "[DecisionVariable] Catchment Name=SedimentProduction Value=12.5"
        );
    }

    #[test]
    fn test_support_without_listeners() {
        let mut support = ModelEventSupport::default();
        assert!(!support.has_listeners());
        support.fire(&ModelEvent::note("Catchment", "nobody listening"));
        support.add_listener(Arc::new(LoggingEventListener::with_prefix("[test] ")));
        support.fire(&ModelEvent::note("Catchment", "logged"));
        support.clear_listeners();
        assert_eq!(support.listener_count(), 0);
    }
}
