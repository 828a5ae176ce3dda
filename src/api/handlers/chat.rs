use crate::{
    AppState,
    types::{ChatContext, ChatReply, Result},
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

/// Chat with the agent
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatContext,
    responses(
        (status = 200, description = "Speaker-labeled reply and updated metadata", body = ChatReply),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Completion endpoint failed")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatContext>,
) -> Result<Json<ChatReply>> {
    let instructions = payload.instructions.unwrap_or_default();

    let (response, metadata) = state
        .chat_service
        .respond(
            &payload.message,
            &payload.context,
            &instructions,
            payload.metadata,
        )
        .await?;

    Ok(Json(ChatReply {
        message: payload.message,
        response,
        metadata,
    }))
}

/// `OPTIONS /chat` outside a CORS preflight
#[utoipa::path(
    options,
    path = "/chat",
    responses(
        (status = 200, description = "Empty JSON object with CORS headers")
    ),
    tag = "chat"
)]
pub async fn chat_options() -> impl IntoResponse {
    (
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        Json(serde_json::json!({})),
    )
}
