//! Analytics as an injected capability.
//!
//! Layers that report usage receive an `Arc<dyn Tracker>`; there is no
//! process-global client.

use serde_json::Value;

/// Sink for named usage events.
pub trait Tracker: Send + Sync {
    /// Record `event` with free-form `properties`. Must not fail the caller.
    fn track(&self, event: &str, properties: Value);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _event: &str, _properties: Value) {}
}

/// Emits events as structured log lines on the `zencode::telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn track(&self, event: &str, properties: Value) {
        tracing::info!(
            target: "zencode::telemetry",
            event = event,
            properties = %properties,
            "event"
        );
    }
}
