//! Expert stylistic overrides

use serde::{Deserialize, Serialize};

/// Overall register of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationTone {
    Cordial,
    #[default]
    Neutral,
    Spirited,
}

impl ConversationTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationTone::Cordial => "cordial",
            ConversationTone::Neutral => "neutral",
            ConversationTone::Spirited => "spirited",
        }
    }
}

/// How strongly an agent leans into its persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityIntensity {
    Subtle,
    #[default]
    Moderate,
    Strong,
}

impl PersonalityIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityIntensity::Subtle => "subtle",
            PersonalityIntensity::Moderate => "moderate",
            PersonalityIntensity::Strong => "strong",
        }
    }
}

/// Optional per-session stylistic override (Value Object)
///
/// Resolved once at session start with documented defaults and immutable
/// during the run. Rendered into a fixed instruction block appended to
/// continuation prompts; when the session carries no settings the block is
/// omitted and the prompt shape is otherwise unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertSettings {
    pub conversation_tone: ConversationTone,
    /// 0 = contrarian, 100 = agreeable. Clamped at construction.
    pub agreement_bias: u8,
    pub personality_intensity: PersonalityIntensity,
    pub temperature: f32,
}

impl ExpertSettings {
    pub fn new(
        conversation_tone: ConversationTone,
        agreement_bias: u8,
        personality_intensity: PersonalityIntensity,
        temperature: f32,
    ) -> Self {
        Self {
            conversation_tone,
            agreement_bias: agreement_bias.min(100),
            personality_intensity,
            temperature,
        }
    }
}

impl Default for ExpertSettings {
    fn default() -> Self {
        Self {
            conversation_tone: ConversationTone::Neutral,
            agreement_bias: 50,
            personality_intensity: PersonalityIntensity::Moderate,
            temperature: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ExpertSettings::default();
        assert_eq!(settings.conversation_tone, ConversationTone::Neutral);
        assert_eq!(settings.agreement_bias, 50);
        assert_eq!(settings.personality_intensity, PersonalityIntensity::Moderate);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_agreement_bias_clamped() {
        let settings = ExpertSettings::new(
            ConversationTone::Spirited,
            250,
            PersonalityIntensity::Strong,
            1.0,
        );
        assert_eq!(settings.agreement_bias, 100);
    }
}
