use crate::AppState;
use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Method, Request, header},
    middleware::{self, Next},
    routing::{get, post},
};
use tower::ServiceExt;
use tower_http::{
    cors::{AllowHeaders, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// OpenAPI document for the public endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::root,
        crate::api::handlers::chat::chat,
        crate::api::handlers::chat::chat_options,
    ),
    components(schemas(
        crate::types::ChatContext,
        crate::types::ChatReply,
        crate::types::HealthResponse,
    )),
    tags(
        (name = "chat", description = "Conversational proxy"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::mirror_request())
}

/// A CORS preflight carries both an `Origin` and the method it asks about.
fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Route table
pub fn create_router() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(crate::api::handlers::health::root))
        .route(
            "/chat",
            post(crate::api::handlers::chat::chat)
                .options(crate::api::handlers::chat::chat_options),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Full application: routes, CORS, request tracing and shared state.
///
/// The CORS layer answers every OPTIONS request itself, so OPTIONS requests
/// that are not preflights skip it and reach the route table directly.
pub fn build_app(state: AppState) -> Router {
    let service = state.config.logging.service.clone().unwrap_or_default();
    let routes = create_router().with_state(state);
    let plain = routes.clone();

    routes
        .layer(cors())
        .layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            let plain = plain.clone();
            async move {
                if req.method() == Method::OPTIONS && !is_preflight(req.method(), req.headers()) {
                    return match plain.oneshot(req).await {
                        Ok(response) => response,
                        Err(never) => match never {},
                    };
                }
                next.run(req).await
            }
        }))
        .layer(
            TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    service = %service,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}
