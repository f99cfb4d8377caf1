//! Prompt templates for the debate flow
//!
//! All functions are pure text producers. The opening speaker of round 1 is
//! seeded only by the topic; later round-1 speakers additionally receive the
//! prior speakers' verbatim text. Continuation rounds embed the full
//! formatted transcript and state whether the round is intermediate or
//! final.

use crate::config::ExpertSettings;
use crate::conversation::entities::ConversationMessage;
use crate::prompt::scenario::Scenario;

/// Templates for generating prompts at each stage
pub struct ScenarioTemplates;

impl ScenarioTemplates {
    fn stance(scenario: Scenario) -> &'static str {
        match scenario {
            Scenario::Debate => {
                "Take a clear position and defend it. Challenge arguments you find weak."
            }
            Scenario::Brainstorm => {
                "Generate concrete ideas and build on what has been said rather than repeating it."
            }
            Scenario::Panel => {
                "Answer from your own expertise, as you would on a moderated expert panel."
            }
        }
    }

    /// Round-1 prompt for the opening speaker, seeded only by the topic.
    pub fn opening(scenario: Scenario, topic: &str, display_name: &str) -> String {
        format!(
            r#"You are {display_name}, opening a {scenario} on the topic:

{topic}

{stance}

Give your opening statement."#,
            display_name = display_name,
            scenario = scenario,
            topic = topic,
            stance = Self::stance(scenario),
        )
    }

    /// Round-1 prompt for a later speaker, embedding the prior speakers'
    /// verbatim text.
    pub fn joining(
        scenario: Scenario,
        topic: &str,
        display_name: &str,
        prior: &[(String, String)],
    ) -> String {
        let mut prompt = format!(
            r#"You are {display_name}, joining a {scenario} on the topic:

{topic}

The conversation so far:
"#,
            display_name = display_name,
            scenario = scenario,
            topic = topic,
        );

        for (name, text) in prior {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", name, text));
        }

        prompt.push_str(&format!(
            "\n{}\n\nRespond to what has been said and add your own view.",
            Self::stance(scenario)
        ));

        prompt
    }

    /// Continuation prompt for rounds 2..N.
    ///
    /// The stylistic-instruction block is appended only when expert settings
    /// are present; its absence leaves the rest of the prompt unchanged.
    pub fn continuation(
        scenario: Scenario,
        topic: &str,
        display_name: &str,
        transcript: &str,
        round: u32,
        total_rounds: u32,
        style: Option<&ExpertSettings>,
    ) -> String {
        let phase = if round >= total_rounds {
            "This is the final round: work toward a synthesis of the discussion and state where you land."
        } else {
            "This is an intermediate round: advance the discussion rather than concluding it."
        };

        let mut prompt = format!(
            r#"You are {display_name} in round {round} of {total_rounds} of a {scenario} on the topic:

{topic}

Full transcript so far:
{transcript}

{phase}

{stance}"#,
            display_name = display_name,
            round = round,
            total_rounds = total_rounds,
            scenario = scenario,
            topic = topic,
            transcript = transcript,
            phase = phase,
            stance = Self::stance(scenario),
        );

        if let Some(settings) = style {
            prompt.push_str("\n\n");
            prompt.push_str(&Self::style_directives(settings));
        }

        prompt
    }

    /// Prompt for replying to a human message inserted mid-conversation.
    pub fn user_response(
        scenario: Scenario,
        topic: &str,
        display_name: &str,
        transcript: &str,
        user_message: &str,
    ) -> String {
        format!(
            r#"You are {display_name} in a {scenario} on the topic:

{topic}

Full transcript so far:
{transcript}

The human observing the conversation just said:

{user_message}

Address the human's message directly, staying in character."#,
            display_name = display_name,
            scenario = scenario,
            topic = topic,
            transcript = transcript,
            user_message = user_message,
        )
    }

    /// Fixed stylistic-instruction block rendered from expert settings.
    pub fn style_directives(settings: &ExpertSettings) -> String {
        format!(
            r#"Style directives:
- Keep a {tone} tone.
- Aim for {bias} on a 0-100 agreeableness scale (0 contrarian, 100 agreeable).
- Express your persona with {intensity} intensity."#,
            tone = settings.conversation_tone.as_str(),
            bias = settings.agreement_bias,
            intensity = settings.personality_intensity.as_str(),
        )
    }

    /// Transcript rendering shared by continuation and user-response
    /// prompts: one block per message, tagged with its display name.
    pub fn format_transcript(messages: &[ConversationMessage]) -> String {
        let mut out = String::new();
        for message in messages {
            out.push_str(&format!(
                "\n[{}] {}\n",
                message.display_name, message.message
            ));
        }
        out
    }
}
