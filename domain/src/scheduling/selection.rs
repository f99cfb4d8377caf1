//! Coordinator speaker selection for popcorn mode
//!
//! In popcorn mode an auxiliary model call chooses the next speaker. The
//! model's reply is untrusted input: it must carry a strict
//! `"<AGENT_ID>: reason"` prefix naming an agent that has not yet spoken
//! this round. Anything else is a parse failure and the caller falls back
//! deterministically to the first unspoken agent. The parser is
//! intentionally strict; a looser one has produced ambiguous selections.

use crate::agent::entities::AgentId;
use crate::conversation::entities::ConversationMessage;

/// How many recent messages the coordinator sees.
pub const COORDINATOR_CONTEXT_WINDOW: usize = 4;

/// System prompt for the coordinator call.
pub fn coordinator_system() -> &'static str {
    r#"You coordinate speaking turns in a multi-party conversation.
Given the recent messages and the list of participants who have not yet
spoken this round, pick who should speak next.
Reply with exactly one line of the form "<AGENT_ID>: reason", where
<AGENT_ID> is one of the listed ids. No other text before the id."#
}

/// User prompt for the coordinator call: the last few messages plus the
/// roster of agents that have not spoken this round.
pub fn coordinator_prompt(
    recent: &[ConversationMessage],
    unspoken: &[(AgentId, String)],
) -> String {
    let mut prompt = String::from("Recent messages:\n");
    for message in recent {
        prompt.push_str(&format!("[{}] {}\n", message.display_name, message.message));
    }

    prompt.push_str("\nParticipants who have not spoken this round:\n");
    for (id, name) in unspoken {
        prompt.push_str(&format!("- {id} ({name})\n"));
    }

    prompt.push_str("\nWho should speak next?");
    prompt
}

/// Parse a coordinator reply.
///
/// Accepts only a `"<AGENT_ID>: reason"` prefix where the id names an
/// unspoken agent. Returns `None` on any other shape; the caller is
/// responsible for the deterministic fallback.
pub fn parse_speaker_choice(reply: &str, unspoken: &[AgentId]) -> Option<AgentId> {
    let trimmed = reply.trim_start();
    let (head, _rest) = trimmed.split_once(':')?;
    let id: AgentId = head.trim().parse().ok()?;
    if unspoken.contains(&id) { Some(id) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;

    fn all() -> Vec<AgentId> {
        vec![AgentId::A, AgentId::B, AgentId::C]
    }

    #[test]
    fn test_parse_valid_choice() {
        assert_eq!(
            parse_speaker_choice("B: has the strongest counterpoint", &all()),
            Some(AgentId::B)
        );
        assert_eq!(
            parse_speaker_choice("  C: closing argument", &all()),
            Some(AgentId::C)
        );
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        assert_eq!(parse_speaker_choice("B should go next", &all()), None);
    }

    #[test]
    fn test_parse_rejects_prose_prefix() {
        assert_eq!(
            parse_speaker_choice("I think B: should speak", &all()),
            None
        );
        assert_eq!(
            parse_speaker_choice("Agent B: strongest view", &all()),
            None
        );
    }

    #[test]
    fn test_parse_rejects_unknown_or_spoken_agent() {
        assert_eq!(parse_speaker_choice("D: who?", &all()), None);
        assert_eq!(
            parse_speaker_choice("A: again", &[AgentId::B, AgentId::C]),
            None
        );
    }

    #[test]
    fn test_parse_rejects_empty_reply() {
        assert_eq!(parse_speaker_choice("", &all()), None);
    }

    #[test]
    fn test_coordinator_prompt_lists_roster_and_messages() {
        let recent = vec![ConversationMessage::agent(
            AgentId::A,
            "Nova",
            "Opening take.",
            Model::new("x/y"),
            "p",
            1,
        )];
        let unspoken = vec![(AgentId::B, "Sage".to_string())];
        let prompt = coordinator_prompt(&recent, &unspoken);
        assert!(prompt.contains("[Nova] Opening take."));
        assert!(prompt.contains("- B (Sage)"));
    }
}
