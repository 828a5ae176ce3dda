//! HTTP API Handlers and Routes
//!
//! # API Endpoints
//!
//! - `GET /` - Health probe, returns `{"message": "Hello world"}`
//! - `POST /chat` - Send a message with its context, receive a labeled reply
//!   and updated metadata
//! - `OPTIONS /chat` - Allowed method and headers for clients that ask
//!   without a CORS preflight
//! - `GET /openapi.json` - OpenAPI document
//!
//! Every route sits behind a permissive CORS layer that answers real
//! preflights itself.
//!
//! There is no authentication; the server is meant to sit behind whatever
//! frontend owns the conversation history.
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
