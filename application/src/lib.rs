//! Application layer for colloquy
//!
//! Use cases and ports. The debate orchestrator lives here together with
//! the turn scheduler and the interfaces it drives: the model gateway, the
//! ledger, the message sink, the usage accountant, and the transcript
//! logger. Adapters implementing the ports live in the infrastructure
//! layer.

pub mod config;
pub mod ports;
pub mod scheduler;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_TEMPERATURE, SessionConfig};
pub use ports::{
    ApiCredential, ChatOutcome, ChatRequest, GatewayError, Ledger, LedgerAccountant, LedgerError,
    MessageSink, ModelGateway, NoTranscriptLogger, NullSink, SinkError, TranscriptEvent,
    TranscriptLogger, UsageAccountant,
};
pub use scheduler::TurnScheduler;
pub use use_cases::{DebateError, DebateOrchestrator, HaltReason, RoundsReport, RunStatus};
