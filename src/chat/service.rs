use super::participants::{detect_agent_name, detect_user_name, Participants};
use super::prompt::{
    agent_named_instruction, construct_prompt, label_response, language_instruction,
    user_named_instruction, DEFAULT_AGENT_INSTRUCTION,
};
use crate::llm::{CompletionClient, CompletionParams};
use crate::types::{Metadata, Result};
use std::sync::Arc;

/// Produces speaker-labeled replies for one chat turn at a time.
///
/// Each call is independent: everything that must survive between turns
/// travels in the returned [`Metadata`].
#[derive(Clone)]
pub struct ChatService {
    client: Arc<dyn CompletionClient>,
    params: CompletionParams,
}

impl ChatService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            params: CompletionParams::default(),
        }
    }

    /// Override the sampling parameters used for the reply itself.
    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    /// Answer `message` given the prior `context`.
    ///
    /// Name detection only runs while a name is still the default, so a
    /// caller that persists the returned metadata pays for it once per side.
    ///
    /// # Errors
    ///
    /// Fails only when the reply completion fails. Name detection failures
    /// are logged and treated as "no name given".
    pub async fn respond(
        &self,
        message: &str,
        context: &str,
        instructions: &str,
        metadata: Option<Metadata>,
    ) -> Result<(String, Metadata)> {
        let mut metadata = metadata.unwrap_or_default();
        let mut participants = Participants::from_metadata(&metadata);
        let mut instructions = instructions.to_string();

        if participants.has_default_user() {
            if let Some(name) = detect_user_name(self.client.as_ref(), message).await {
                tracing::info!(user_name = %name, "User stated a name");
                instructions.push_str(&user_named_instruction(&name));
                participants.user = name;
            }
        }

        if participants.has_default_agent() {
            match detect_agent_name(self.client.as_ref(), message).await {
                Some(name) => {
                    tracing::info!(agent_name = %name, "User named the agent");
                    instructions.push_str(&agent_named_instruction(&name));
                    participants.agent = name;
                }
                None => instructions.push_str(DEFAULT_AGENT_INSTRUCTION),
            }
        }

        instructions.push_str(&language_instruction(&participants.user));
        participants.write_to(&mut metadata);

        let prompt = construct_prompt(message, context, &instructions, &participants);
        tracing::debug!("Prompt: {}", prompt);

        let reply = self.client.complete(&prompt, &self.params).await?;
        let response = label_response(&reply, &participants.agent);
        tracing::debug!("Response: {}", response);

        Ok((response, metadata))
    }
}
