//! Turn scheduling: round state and coordinator selection parsing

pub mod round;
pub mod selection;

pub use round::{RoundPhase, RoundState};
pub use selection::{
    COORDINATOR_CONTEXT_WINDOW, coordinator_prompt, coordinator_system, parse_speaker_choice,
};
