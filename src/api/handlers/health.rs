use crate::types::HealthResponse;
use axum::Json;

/// Health probe
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Hello world".to_string(),
    })
}
