//! Use cases

pub mod run_debate;

pub use run_debate::DebateOrchestrator;
pub use run_debate::types::{DebateError, HaltReason, RoundsReport, RunStatus};
