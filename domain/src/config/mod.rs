//! Session option value objects

pub mod expert_settings;
pub mod session_options;

pub use expert_settings::{ConversationTone, ExpertSettings, PersonalityIntensity};
pub use session_options::{AccountingMode, ResponseLength, TurnOrder};
