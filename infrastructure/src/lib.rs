//! Infrastructure layer for colloquy
//!
//! Adapters behind the application ports: the OpenRouter-compatible HTTP
//! gateway, the guest and account ledgers with their balance store, TOML
//! configuration loading, and the JSONL transcript logger.

pub mod config;
pub mod ledger;
pub mod logging;
pub mod openrouter;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use ledger::{AccountLedger, BalanceStore, GuestLedger, MemoryBalanceStore};
pub use logging::JsonlTranscriptLogger;
pub use openrouter::OpenRouterGateway;
