//! Completion client abstraction and provider selection
//!
//! Parley talks to a single text-completion endpoint. The [`CompletionClient`]
//! trait keeps the chat pipeline independent of the concrete HTTP client so
//! tests can swap in scripted responses.

use crate::types::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Default model used when neither the request nor the config names one.
pub const DEFAULT_MODEL: &str = "text-davinci-003";

/// Sampling parameters for one completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionParams {
    /// Overrides the client's configured model when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub best_of: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1000,
            temperature: 0.9,
            top_p: 1.0,
            frequency_penalty: 1.0,
            presence_penalty: 0.0,
            best_of: 1,
        }
    }
}

/// Generic completion client trait for provider abstraction
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt` and return the cleaned-up continuation text
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String>;

    /// Get the default model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI-compatible legacy completions API
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "sk-...".to_string(),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     model: "text-davinci-003".to_string(),
    ///     max_prompt_chars: 4096,
    ///     timeout_secs: 60,
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        max_prompt_chars: usize,
        timeout_secs: u64,
    },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn create_client(&self) -> Result<Arc<dyn CompletionClient>> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                max_prompt_chars,
                timeout_secs,
            } => Ok(Arc::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *max_prompt_chars,
                *timeout_secs,
            )?)),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = CompletionParams::default();
        assert_eq!(params.model, None);
        assert_eq!(params.max_tokens, 1000);
        assert_eq!(params.temperature, 0.9);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.frequency_penalty, 1.0);
        assert_eq!(params.presence_penalty, 0.0);
        assert_eq!(params.best_of, 1);
    }

    #[test]
    fn test_params_skip_unset_model() {
        let value = serde_json::to_value(CompletionParams::default()).unwrap();
        assert!(value.get("model").is_none());
        assert_eq!(value["max_tokens"], 1000);
    }

    #[test]
    fn test_provider_name() {
        let openai = Provider::OpenAI {
            api_key: "".to_string(),
            api_base: "".to_string(),
            model: "".to_string(),
            max_prompt_chars: 4096,
            timeout_secs: 60,
        };
        assert_eq!(openai.name(), "OpenAI");
    }

    #[test]
    fn test_provider_creates_client_with_configured_model() {
        let provider = Provider::OpenAI {
            api_key: "test".to_string(),
            api_base: "http://localhost:9".to_string(),
            model: "davinci-002".to_string(),
            max_prompt_chars: 4096,
            timeout_secs: 5,
        };

        let client = provider.create_client().unwrap();
        assert_eq!(client.model_name(), "davinci-002");
    }
}
