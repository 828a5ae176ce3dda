//! Chat turn pipeline
//!
//! One turn goes through these steps:
//!
//! 1. resolve the user/agent names from caller metadata ([`participants`])
//! 2. ask the completion endpoint whether the message names either side
//!    ([`questions`])
//! 3. assemble hidden instructions and the prompt ([`prompt`])
//! 4. complete the prompt and fix up the reply's speaker label ([`service`])

/// Name resolution and detection.
pub mod participants;
/// Prompt layout, instruction fragments and speaker labels.
pub mod prompt;
/// Numbered question prompts and answer parsing.
pub mod questions;
/// Chat response orchestration.
pub mod service;

pub use participants::Participants;
pub use service::ChatService;
