use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller-owned key/value state carried between turns.
///
/// Parley reads and writes `userName` and `agentName`; any other keys are
/// passed back untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ============= API Request/Response Types =============

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "message": "User: How's the weather today?",
    "context": "User: Hello world\nAgent: Hello world"
}))]
pub struct ChatContext {
    /// New message to respond to, usually prefixed with a speaker label
    pub message: String,
    /// Prior conversation transcript
    pub context: String,
    /// Extra hidden instructions for this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Metadata returned by the previous turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
}

/// Body returned from `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    /// The message exactly as it was received
    pub message: String,
    /// Speaker-labeled reply
    pub response: String,
    /// Updated metadata for the caller to persist
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::LLM(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
