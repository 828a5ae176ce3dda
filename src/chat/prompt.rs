//! Prompt layout and speaker-label handling
//!
//! The chat prompt is a plain-text document with three sections:
//!
//! ```text
//! [Context]
//! <prior transcript>
//! [New Message]
//! <latest message>
//! [Hidden Instructions]
//! (<instructions>)
//! ```
//!
//! The hidden-instruction section is only present when there is something to
//! say. Instruction fragments end with a trailing space so they can be
//! concatenated directly.

use super::participants::{Participants, DEFAULT_AGENT_NAME, DEFAULT_USER_NAME};

/// Build the completion prompt for one chat turn.
///
/// A leading `User:` label on `message` is rewritten to the resolved user
/// name so the model sees the name the user chose.
pub fn construct_prompt(
    message: &str,
    context: &str,
    instructions: &str,
    participants: &Participants,
) -> String {
    let message = relabel(message, DEFAULT_USER_NAME, &participants.user);

    let mut prompt = format!("[Context]\n{context}\n[New Message]\n{message}\n");
    if !instructions.is_empty() {
        prompt.push_str(&format!("[Hidden Instructions]\n({instructions})"));
    }
    prompt
}

/// Make sure `reply` starts with the agent's speaker label.
pub fn label_response(reply: &str, agent_name: &str) -> String {
    let default_label = label(DEFAULT_AGENT_NAME);
    if reply.starts_with(&default_label) && agent_name != DEFAULT_AGENT_NAME {
        relabel(reply, DEFAULT_AGENT_NAME, agent_name)
    } else if reply.starts_with(&label(agent_name)) {
        reply.to_string()
    } else {
        format!("{}: {}", agent_name, reply)
    }
}

pub fn user_named_instruction(user_name: &str) -> String {
    format!(
        "User just gave a new name to the User self: {user_name}. \
         Add a quick compliment to the new User name in your response. "
    )
}

pub fn agent_named_instruction(agent_name: &str) -> String {
    format!(
        "User just gave a new name to you or the Agent: {agent_name}. \
         Add a quick confirmation to the new Agent name in your response. "
    )
}

pub const DEFAULT_AGENT_INSTRUCTION: &str =
    "User converses with you or the Agent. Agent is your name for now. ";

pub fn language_instruction(user_name: &str) -> String {
    format!(
        "If you're confident {user_name}'s latest message is using a language other than English \
         or instructing so, please respond in that language, otherwise, stay with English. "
    )
}

fn label(name: &str) -> String {
    format!("{name}:")
}

/// Swap a leading `{from}:` label for `{to}:`. Text without the label is
/// returned unchanged.
fn relabel(text: &str, from: &str, to: &str) -> String {
    if from == to {
        return text.to_string();
    }
    match text.strip_prefix(&label(from)) {
        Some(rest) => format!("{}{}", label(to), rest),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn participants(user: &str, agent: &str) -> Participants {
        Participants {
            user: user.to_string(),
            agent: agent.to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_all_sections() {
        let prompt = construct_prompt(
            "User: How's the weather today?",
            "User: Hello world\nAgent: Hello world",
            "Be brief. ",
            &Participants::default(),
        );

        assert_eq!(
            prompt,
            "[Context]\nUser: Hello world\nAgent: Hello world\n\
             [New Message]\nUser: How's the weather today?\n\
             [Hidden Instructions]\n(Be brief. )"
        );
    }

    #[test]
    fn test_prompt_without_instructions_has_no_hidden_section() {
        let prompt = construct_prompt("User: hi", "", "", &Participants::default());
        assert_eq!(prompt, "[Context]\n\n[New Message]\nUser: hi\n");
        assert!(!prompt.contains("[Hidden Instructions]"));
    }

    #[test]
    fn test_prompt_relabels_user_message() {
        let prompt = construct_prompt(
            "User: I am back",
            "",
            "",
            &participants("Alice", DEFAULT_AGENT_NAME),
        );
        assert!(prompt.contains("[New Message]\nAlice: I am back\n"));
    }

    #[test]
    fn test_prompt_only_relabels_leading_user_label() {
        let prompt = construct_prompt(
            "User: say 'User: hi'",
            "",
            "",
            &participants("Alice", DEFAULT_AGENT_NAME),
        );
        assert!(prompt.contains("Alice: say 'User: hi'"));
    }

    #[test]
    fn test_prompt_leaves_unlabeled_message_alone() {
        let prompt = construct_prompt(
            "hello there",
            "",
            "",
            &participants("Alice", DEFAULT_AGENT_NAME),
        );
        assert!(prompt.contains("[New Message]\nhello there\n"));
    }

    #[rstest]
    #[case("Agent: Hello!", "Agent", "Agent: Hello!")]
    #[case("Agent: Hello!", "Max", "Max: Hello!")]
    #[case("Max: Hello!", "Max", "Max: Hello!")]
    #[case("Hello!", "Max", "Max: Hello!")]
    #[case("Hello!", "Agent", "Agent: Hello!")]
    #[case("", "Agent", "Agent: ")]
    fn test_label_response(#[case] reply: &str, #[case] agent: &str, #[case] expected: &str) {
        assert_eq!(label_response(reply, agent), expected);
    }

    #[test]
    fn test_label_response_only_rewrites_leading_label() {
        assert_eq!(
            label_response("Agent: call me Agent: later", "Max"),
            "Max: call me Agent: later"
        );
    }

    #[test]
    fn test_instruction_fragments_end_with_space() {
        assert!(user_named_instruction("Alice").ends_with(' '));
        assert!(agent_named_instruction("Max").ends_with(' '));
        assert!(DEFAULT_AGENT_INSTRUCTION.ends_with(' '));
        assert!(language_instruction("Alice").starts_with("If you're confident Alice's"));
    }
}
