//! Ports: interfaces the application layer depends on
//!
//! Adapters implementing them live in the infrastructure layer (or in the
//! caller, for sinks and accountants).

pub mod accounting;
pub mod ledger;
pub mod message_sink;
pub mod model_gateway;
pub mod transcript_logger;

pub use accounting::{LedgerAccountant, UsageAccountant};
pub use ledger::{Ledger, LedgerError};
pub use message_sink::{MessageSink, NullSink, SinkError};
pub use model_gateway::{ApiCredential, ChatOutcome, ChatRequest, GatewayError, ModelGateway};
pub use transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
