//! Prompt construction: scenarios, templates, display names

pub mod builder;
pub mod display_name;
pub mod scenario;
pub mod template;

pub use builder::PromptBuilder;
pub use display_name::DisplayNameCache;
pub use scenario::{Scenario, ScenarioSpec, registry};
pub use template::ScenarioTemplates;
