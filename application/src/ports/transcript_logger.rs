//! Port for structured transcript logging.
//!
//! Records conversation events (emitted messages, debits, halts) to a
//! machine-readable log, one record per event. This is separate from the
//! `tracing`-based operation logs: tracing carries human-readable
//! diagnostics, this port carries the transcript.

use serde_json::Value;

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g. "message", "debit", "halt").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// `log` is intentionally synchronous and non-fallible so logging can never
/// disrupt a running conversation; implementations swallow their own
/// failures.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
