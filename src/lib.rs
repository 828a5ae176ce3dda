//! # Parley - conversational proxy
//!
//! Parley sits between a chat frontend and a text-completion endpoint. For
//! every turn it:
//!
//! 1. works out what the user and the agent are called (from caller
//!    metadata, or by asking the model whether the message assigns a name),
//! 2. builds hidden instructions (name acknowledgements, language matching),
//! 3. sends a single `[Context]` / `[New Message]` / `[Hidden Instructions]`
//!    prompt to the completion endpoint,
//! 4. makes sure the reply starts with the agent's speaker label.
//!
//! Parley keeps no state between requests. The updated metadata is returned
//! to the caller, who hands it back on the next turn.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use parley::{ChatService, Provider};
//!
//! let client = Provider::OpenAI {
//!     api_key: std::env::var("OPENAI_API_KEY")?,
//!     api_base: "https://api.openai.com/v1".to_string(),
//!     model: "text-davinci-003".to_string(),
//!     max_prompt_chars: 4096,
//!     timeout_secs: 60,
//! }
//! .create_client()?;
//!
//! let service = ChatService::new(client);
//! let (reply, metadata) = service
//!     .respond("User: I'm Alice", "User: Hello\nAgent: Hello", "", None)
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and routes
//! - [`chat`] - Prompt construction, name detection and reply labeling
//! - [`llm`] - Completion client trait and OpenAI implementation
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - Configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Chat turn pipeline.
pub mod chat;
/// Completion endpoint clients.
pub mod llm;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use api::routes::{build_app, create_router};
pub use chat::{ChatService, Participants};
pub use llm::{CompletionClient, CompletionParams, OpenAIClient, Provider};
pub use types::{AppError, Result};
pub use utils::toml_config::ParleyConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<ParleyConfig>,
    /// Chat pipeline backed by the configured completion client
    pub chat_service: Arc<ChatService>,
}
