use super::questions::ask;
use crate::llm::CompletionClient;
use crate::types::Metadata;
use serde_json::Value;

pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_AGENT_NAME: &str = "Agent";

/// Metadata key holding the user's display name.
pub const USER_NAME_KEY: &str = "userName";
/// Metadata key holding the agent's display name.
pub const AGENT_NAME_KEY: &str = "agentName";

const USER_NAME_QUESTIONS: [&str; 2] = [
    "Is the User trying to state a name for himself/herself (yes or no)?",
    "If yes, what is the user name (give me just the name), otherwise, say 'No'.",
];

const AGENT_NAME_QUESTIONS: [&str; 2] = [
    "Is the User trying to give name to you or the Agent (yes or no)?",
    "If yes, what is name User wants to call you or the Agent (give me just the name), otherwise, say 'No'.",
];

/// Display names for both sides of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    pub user: String,
    pub agent: String,
}

impl Default for Participants {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_NAME.to_string(),
            agent: DEFAULT_AGENT_NAME.to_string(),
        }
    }
}

impl Participants {
    /// Read the names from caller metadata, falling back to the defaults
    /// for missing or non-string values.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let name = |key: &str, default: &str| {
            metadata
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        Self {
            user: name(USER_NAME_KEY, DEFAULT_USER_NAME),
            agent: name(AGENT_NAME_KEY, DEFAULT_AGENT_NAME),
        }
    }

    pub fn write_to(&self, metadata: &mut Metadata) {
        metadata.insert(USER_NAME_KEY.to_string(), Value::String(self.user.clone()));
        metadata.insert(AGENT_NAME_KEY.to_string(), Value::String(self.agent.clone()));
    }

    pub fn has_default_user(&self) -> bool {
        self.user == DEFAULT_USER_NAME
    }

    pub fn has_default_agent(&self) -> bool {
        self.agent == DEFAULT_AGENT_NAME
    }
}

/// Ask whether `message` tells us the user's own name.
pub async fn detect_user_name(client: &dyn CompletionClient, message: &str) -> Option<String> {
    accepted_name(&ask(client, message, &USER_NAME_QUESTIONS).await)
}

/// Ask whether `message` gives the agent a name.
pub async fn detect_agent_name(client: &dyn CompletionClient, message: &str) -> Option<String> {
    accepted_name(&ask(client, message, &AGENT_NAME_QUESTIONS).await)
}

/// A name counts only for a yes on the first question and a non-"no" second
/// answer.
fn accepted_name(answers: &[String]) -> Option<String> {
    match answers {
        [intent, name]
            if intent.to_lowercase().contains("yes") && name.to_lowercase() != "no" =>
        {
            Some(name.clone())
        }
        _ => None,
    }
}
