//! Scenario registry
//!
//! A scenario is a named template set that flavors every prompt of a
//! conversation. The registry is static; scenarios are immutable and
//! looked up by name at session start.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Conversation scenario (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Agents take positions and argue them.
    #[default]
    Debate,
    /// Agents generate and build on ideas together.
    Brainstorm,
    /// Agents answer as experts on a moderated panel.
    Panel,
}

/// Registry entry describing one scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSpec {
    pub scenario: Scenario,
    pub name: &'static str,
    pub description: &'static str,
}

/// All registered scenarios.
pub fn registry() -> &'static [ScenarioSpec] {
    &[
        ScenarioSpec {
            scenario: Scenario::Debate,
            name: "debate",
            description: "Agents take opposing positions and argue them",
        },
        ScenarioSpec {
            scenario: Scenario::Brainstorm,
            name: "brainstorm",
            description: "Agents riff on the topic and build on each other's ideas",
        },
        ScenarioSpec {
            scenario: Scenario::Panel,
            name: "panel",
            description: "Agents answer as domain experts on a moderated panel",
        },
    ]
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        registry()
            .iter()
            .find(|s| s.scenario == *self)
            .map(|s| s.name)
            .unwrap_or("debate")
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Scenario {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry()
            .iter()
            .find(|spec| spec.name == s.to_ascii_lowercase())
            .map(|spec| spec.scenario)
            .ok_or_else(|| DomainError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = registry().iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), registry().len());
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!("panel".parse::<Scenario>().unwrap(), Scenario::Panel);
        assert_eq!("Debate".parse::<Scenario>().unwrap(), Scenario::Debate);
        assert!(matches!(
            "courtroom".parse::<Scenario>(),
            Err(DomainError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_display_matches_registry_name() {
        assert_eq!(Scenario::Brainstorm.to_string(), "brainstorm");
    }
}
