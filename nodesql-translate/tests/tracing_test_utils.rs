//! Test utilities for verifying tracing event emission.
//!
//! Provides an `EventCapture` layer that records event messages and fields
//! during tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A recorded event with its level and fields (`message` included).
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

/// Shared storage for captured events.
#[derive(Debug, Clone, Default)]
pub struct EventStore(Arc<Mutex<Vec<CapturedEvent>>>);

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    /// Returns the first event whose message equals `message`, if any.
    pub fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.message() == Some(message))
            .cloned()
    }
}

/// A tracing `Layer` that captures events into an `EventStore`.
pub struct EventCaptureLayer {
    store: EventStore,
}

impl EventCaptureLayer {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S: Subscriber> Layer<S> for EventCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldVisitor(HashMap::new());
        event.record(&mut fields);
        self.store.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: fields.0,
        });
    }
}

/// Install a capturing subscriber for the current thread.
///
/// Returns the store and a guard; events are captured until the guard drops.
pub fn capture() -> (EventStore, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::prelude::*;

    let store = EventStore::new();
    let subscriber =
        tracing_subscriber::registry().with(EventCaptureLayer::new(store.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
