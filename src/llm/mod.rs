//! Completion Provider Clients
//!
//! This module hides the text-completion endpoint behind the
//! [`CompletionClient`] trait. The chat pipeline only ever sees the trait;
//! [`Provider`] decides which concrete client backs it.
//!
//! # Example
//!
//! ```ignore
//! use parley::llm::{CompletionParams, Provider};
//!
//! let client = Provider::OpenAI {
//!     api_key: "sk-...".to_string(),
//!     api_base: "https://api.openai.com/v1".to_string(),
//!     model: "text-davinci-003".to_string(),
//!     max_prompt_chars: 4096,
//!     timeout_secs: 60,
//! }
//! .create_client()?;
//!
//! let text = client.complete("Say hi", &CompletionParams::default()).await?;
//! ```

/// Core completion client trait and sampling parameters.
pub mod client;
/// OpenAI-compatible HTTP client.
pub mod openai;

pub use client::{CompletionClient, CompletionParams, Provider, DEFAULT_MODEL};
pub use openai::OpenAIClient;
