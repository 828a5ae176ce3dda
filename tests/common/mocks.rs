//! Mock implementations for testing.
//!
//! This module provides a scripted completion client that can be shared
//! across test files without duplication.

use async_trait::async_trait;
use parking_lot::Mutex;
use parley::llm::{CompletionClient, CompletionParams};
use parley::types::{AppError, Result};

type Responder = dyn Fn(&str) -> Result<String> + Send + Sync;

/// Answer given to name-detection questions when nothing was named.
pub const NO_NAME: &str = "1. No\n2. No";

/// Completion client that answers from a closure and records every call.
///
/// # Examples
///
/// ```ignore
/// // Reply "Hello!" to chat prompts, "no name" to detection questions
/// let client = ScriptedCompletionClient::new("Hello!");
///
/// // Full control over every prompt
/// let client = ScriptedCompletionClient::with_responder(|prompt| {
///     Ok(if prompt.contains("[Questions]") { "1. Yes\n2. Bob" } else { "Hi Bob" }.to_string())
/// });
///
/// // Every call fails
/// let client = ScriptedCompletionClient::failing();
/// ```
pub struct ScriptedCompletionClient {
    responder: Box<Responder>,
    calls: Mutex<Vec<(String, CompletionParams)>>,
}

impl ScriptedCompletionClient {
    /// Reply with `response` to chat prompts and "no name" to questions.
    pub fn new(response: &str) -> Self {
        let response = response.to_string();
        Self::with_responder(move |prompt| {
            if is_question_prompt(prompt) {
                Ok(NO_NAME.to_string())
            } else {
                Ok(response.clone())
            }
        })
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a client that always returns an error.
    pub fn failing() -> Self {
        Self::with_responder(|_| Err(AppError::LLM("Mock completion failure".to_string())))
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Parameters seen so far, in call order.
    pub fn params(&self) -> Vec<CompletionParams> {
        self.calls.lock().iter().map(|(_, p)| p.clone()).collect()
    }
}

/// Whether `prompt` is a name-detection question rather than a chat turn.
pub fn is_question_prompt(prompt: &str) -> bool {
    prompt.starts_with("[Input]")
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String> {
        self.calls.lock().push((prompt.to_string(), params.clone()));
        (self.responder)(prompt)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
