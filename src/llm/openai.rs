use crate::llm::client::{CompletionClient, CompletionParams};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Marker some models echo back from the prompt; stripped from every reply.
const RESPONSE_MARKER: &str = "[Response]";

/// Client for the OpenAI-compatible `/completions` endpoint.
pub struct OpenAIClient {
    http_client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_prompt_chars: usize,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    best_of: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

impl OpenAIClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        max_prompt_chars: usize,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            max_prompt_chars,
        })
    }

    async fn send(&self, request: &CompletionRequest<'_>) -> Result<String> {
        let url = format!("{}/completions", self.api_base);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!(
                "OpenAI request failed ({}): {}",
                status, text
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to parse response: {}", e)))?;
        tracing::debug!(response = %body, "Completion response");

        let parsed: CompletionResponse = serde_json::from_value(body)
            .map_err(|e| AppError::LLM(format!("Unexpected response shape: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| clean_completion(&choice.text))
            .ok_or_else(|| AppError::LLM("No response from OpenAI".to_string()))
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String> {
        let prompt = tail_chars(prompt, self.max_prompt_chars);
        let request = CompletionRequest {
            model: params.model.as_deref().unwrap_or(&self.model),
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            best_of: params.best_of,
        };

        self.send(&request).await.inspect_err(|e| {
            tracing::error!(model = request.model, "OpenAI request error: {}", e);
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Keep at most the last `max_chars` characters of `text`.
fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    match text.char_indices().nth(total - max_chars) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

fn clean_completion(text: &str) -> String {
    text.replace(RESPONSE_MARKER, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_chars_short_text_untouched() {
        assert_eq!(tail_chars("hello", 10), "hello");
        assert_eq!(tail_chars("hello", 5), "hello");
    }

    #[test]
    fn test_tail_chars_keeps_end() {
        assert_eq!(tail_chars("abcdefgh", 3), "fgh");
    }

    #[test]
    fn test_tail_chars_respects_char_boundaries() {
        let text = "héllo wörld";
        let tail = tail_chars(text, 5);
        assert_eq!(tail, "wörld");
        assert_eq!(tail.chars().count(), 5);
    }

    #[test]
    fn test_clean_completion_strips_marker() {
        assert_eq!(
            clean_completion("\n[Response] Agent: Hi there! \n"),
            "Agent: Hi there!"
        );
        assert_eq!(clean_completion("  plain  "), "plain");
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base() {
        let client = OpenAIClient::new(
            "key".to_string(),
            "https://api.openai.com/v1/".to_string(),
            "text-davinci-003".to_string(),
            4096,
            30,
        )
        .unwrap();
        assert_eq!(client.api_base, "https://api.openai.com/v1");
    }
}
