//! API request handlers.

/// Chat and CORS preflight handlers.
pub mod chat;
/// Health probe handler.
pub mod health;
